//! Command-line interface.
//!
//! Maps command-line flags onto the library `Config`.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{
    Config, LogFormat, LogLevel, DEFAULT_CONCURRENCY, DEFAULT_DELAY_MS, DEFAULT_METHOD,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

/// Probe web targets for CORS misconfigurations.
#[derive(Debug, Parser)]
#[command(name = "corsmisc", version, about, long_about = None)]
pub struct Cli {
    /// File with one URL per line (`-` reads stdin)
    #[arg(short = 'u', long = "urls", value_name = "PATH", default_value = "-")]
    pub urls: PathBuf,

    /// Write results as a JSON array to this file
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Number of concurrent workers
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Delay before each request, in milliseconds
    #[arg(short = 'd', long, value_name = "MS", default_value_t = DEFAULT_DELAY_MS)]
    pub delay: u64,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// HTTP method for probe requests
    #[arg(short = 'X', long, default_value = DEFAULT_METHOD)]
    pub method: String,

    /// Upstream HTTP proxy
    #[arg(short = 'x', long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Try every origin instead of stopping at the first reflection
    #[arg(long)]
    pub all: bool,

    /// Extra request header, `Name: Value` (repeatable)
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log failed requests (same as `--log-level debug`)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Cli {
    /// Converts parsed flags into a library `Config`.
    pub fn into_config(self) -> Config {
        let log_level = if self.verbose && self.log_level == LogLevel::Info {
            LogLevel::Debug
        } else {
            self.log_level
        };

        Config {
            input: self.urls,
            output: self.output,
            concurrency: self.concurrency,
            delay_ms: self.delay,
            timeout_seconds: self.timeout,
            method: self.method,
            proxy: self.proxy,
            all_origins: self.all,
            headers: self.headers,
            user_agent: self.user_agent,
            log_level,
            log_format: self.log_format,
            no_color: self.no_color,
        }
    }
}

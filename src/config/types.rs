//! Configuration types.
//!
//! This module defines the library configuration struct and the log enums
//! shared with the command-line front end.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ORIGIN};
use reqwest::Method;

use crate::config::constants::{
    DEFAULT_CONCURRENCY, DEFAULT_DELAY_MS, DEFAULT_METHOD, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};
use crate::error_handling::InitializationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// Adds per-request failures (verbose mode)
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// Constructed once and shared read-only by the dispatcher and every worker.
///
/// # Examples
///
/// ```no_run
/// use corsmisc::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     input: PathBuf::from("urls.txt"),
///     concurrency: 10,
///     all_origins: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// File to read URLs from (`-` reads stdin)
    pub input: PathBuf,

    /// JSON output file, written once after the run
    pub output: Option<PathBuf>,

    /// Number of concurrent workers
    pub concurrency: usize,

    /// Pause before every probe request, in milliseconds
    pub delay_ms: u64,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP method used for probe requests
    pub method: String,

    /// Upstream HTTP proxy URL
    pub proxy: Option<String>,

    /// Try every candidate origin instead of stopping at the first reflection
    pub all_origins: bool,

    /// Extra request headers, each as `Name: Value`
    pub headers: Vec<String>,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Disable colored terminal output
    pub no_color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("-"),
            output: None,
            concurrency: DEFAULT_CONCURRENCY,
            delay_ms: DEFAULT_DELAY_MS,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            method: DEFAULT_METHOD.to_string(),
            proxy: None,
            all_origins: false,
            headers: Vec::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            no_color: false,
        }
    }
}

impl Config {
    /// Checks every value that would otherwise fail halfway through a run.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidConfig` naming the offending option.
    pub fn validate(&self) -> Result<(), InitializationError> {
        if self.concurrency == 0 {
            return Err(InitializationError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(InitializationError::InvalidConfig(
                "timeout must be at least 1 second".to_string(),
            ));
        }
        self.http_method()?;
        self.request_headers()?;
        for line in self.ignored_origin_headers() {
            log::warn!("Ignoring user-supplied Origin header: {line}");
        }
        if let Some(proxy) = &self.proxy {
            url::Url::parse(proxy).map_err(|e| {
                InitializationError::InvalidConfig(format!("invalid proxy URL '{proxy}': {e}"))
            })?;
        }
        Ok(())
    }

    /// Returns `true` when URLs are read from standard input.
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }

    /// Pause applied before every probe request.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Parses the configured method (case-sensitive, e.g. `GET`, `OPTIONS`).
    pub fn http_method(&self) -> Result<Method, InitializationError> {
        Method::from_bytes(self.method.as_bytes()).map_err(|_| {
            InitializationError::InvalidConfig(format!("invalid HTTP method '{}'", self.method))
        })
    }

    /// Builds the extra headers sent with every probe.
    ///
    /// An `Origin` entry is dropped: the candidate origin always owns that header.
    /// Called once per worker client, so it never logs; `validate` reports
    /// dropped entries.
    pub fn request_headers(&self) -> Result<HeaderMap, InitializationError> {
        let mut map = HeaderMap::new();
        for line in &self.headers {
            let (name, value) = parse_header_line(line)?;
            if name != ORIGIN {
                map.append(name, value);
            }
        }
        Ok(map)
    }

    /// Header lines that `request_headers` drops because they set `Origin`.
    pub fn ignored_origin_headers(&self) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|line| matches!(parse_header_line(line), Ok((name, _)) if name == ORIGIN))
            .map(String::as_str)
            .collect()
    }
}

/// Splits a `Name: Value` header line on its first colon.
pub fn parse_header_line(line: &str) -> Result<(HeaderName, HeaderValue), InitializationError> {
    let (name, value) = line.split_once(':').ok_or_else(|| {
        InitializationError::InvalidConfig(format!("header '{line}' is not in 'Name: Value' form"))
    })?;
    let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|_| {
        InitializationError::InvalidConfig(format!("invalid header name in '{line}'"))
    })?;
    let value = HeaderValue::from_str(value.trim()).map_err(|_| {
        InitializationError::InvalidConfig(format!("invalid header value in '{line}'"))
    })?;
    Ok((name, value))
}

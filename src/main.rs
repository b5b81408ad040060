//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `corsmisc` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Exit status
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use corsmisc::cli::Cli;
use corsmisc::initialization::init_logger_with;
use corsmisc::run_scan;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Cli::parse().into_config();

    init_logger_with(
        config.log_level.clone().into(),
        config.log_format.clone(),
        !config.no_color,
    )
    .context("Failed to initialize logger")?;

    match run_scan(config).await {
        Ok(report) => {
            if let Some(path) = &report.output_path {
                eprintln!(
                    "{} finding{} saved in {}",
                    report.results.len(),
                    if report.results.len() == 1 { "" } else { "s" },
                    path.display()
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("corsmisc error: {:#}", e);
            process::exit(1);
        }
    }
}

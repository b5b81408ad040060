//! corsmisc library: CORS misconfiguration probing
//!
//! For every target URL this library sends a fixed sequence of requests, each
//! with a different crafted `Origin` header, and records which origins the
//! server echoes back in `Access-Control-Allow-Origin`, together with the
//! `Access-Control-Allow-Credentials` value seen on the matching response.
//!
//! # Example
//!
//! ```no_run
//! use corsmisc::{Config, run_scan};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: std::path::PathBuf::from("urls.txt"),
//!     concurrency: 10,
//!     ..Default::default()
//! };
//!
//! let report = run_scan(config).await?;
//! for result in &report.results {
//!     println!("{} reflects {:?} (credentials: {:?})", result.url, result.acao, result.acac);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod cli;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod initialization;
pub mod input;
pub mod models;
pub mod origins;
pub mod probe;
pub mod run;
pub mod target;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use export::{load_results, save_results};
pub use models::ScanResult;
pub use origins::generate_origins;
pub use probe::{ProbeClient, TargetEvaluator};
pub use run::{probe_urls, run_scan, ScanReport};
pub use target::TargetUrl;

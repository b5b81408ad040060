//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, sentinel values, header names)
//! - The library `Config` struct and its validation
//! - Log level and format enums shared with the CLI

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{parse_header_line, Config, LogFormat, LogLevel};

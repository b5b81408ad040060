//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of a run:
//! - The logger
//! - Per-worker probe HTTP clients
//!
//! All initialization functions return `InitializationError` on failure.

mod client;
mod logger;

// Re-export public API
pub use client::init_probe_client;
pub use logger::init_logger_with;

//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for initialization, targets, input and export
//! - Categorization of transport errors
//! - Per-worker processing counters
//!
//! Only input and export errors stop a run; everything else is counted and
//! skipped.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use stats::ProcessingStats;
pub use types::{ErrorType, ExportError, InitializationError, InputError, TargetError};

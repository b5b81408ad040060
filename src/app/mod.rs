//! Run output.
//!
//! Findings go to stdout as they are discovered; the end-of-run summary goes
//! through the logger.

mod report;
mod statistics;

pub use report::print_finding;
pub use statistics::print_run_statistics;

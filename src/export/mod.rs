//! Result persistence.
//!
//! The run hands its collected results to this sink once, after every worker
//! has finished.

mod json;

pub use json::{load_results, resolve_output_path, save_results};

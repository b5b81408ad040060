//! CORS probing.
//!
//! - `client` - sends one request with a given `Origin` and keeps the CORS headers
//! - `evaluator` - runs the candidate origins for one target and classifies responses

mod client;
mod evaluator;

pub use client::{ProbeClient, ProbeResponse};
pub use evaluator::TargetEvaluator;

//! Processing statistics tracking.
//!
//! Each worker owns one `ProcessingStats`; the dispatcher merges them after
//! all workers have joined, so no counter is shared while probing.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use super::types::ErrorType;

/// Per-worker processing counters.
///
/// All error types are initialized to zero on creation so reports always list
/// every category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    errors: BTreeMap<ErrorType, usize>,
    targets: usize,
    requests: usize,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    pub fn new() -> Self {
        let errors = ErrorType::iter().map(|e| (e, 0)).collect();
        ProcessingStats {
            errors,
            targets: 0,
            requests: 0,
        }
    }

    /// Increment an error counter.
    pub fn increment_error(&mut self, error: ErrorType) {
        *self.errors.entry(error).or_insert(0) += 1;
    }

    /// Counts one URL pulled from the queue.
    pub fn record_target(&mut self) {
        self.targets += 1;
    }

    /// Counts one probe request that was sent (successful or not).
    pub fn record_request(&mut self) {
        self.requests += 1;
    }

    /// Get the count for an error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors.get(&error).copied().unwrap_or(0)
    }

    /// Total transport failures across all categories.
    pub fn failed_requests(&self) -> usize {
        self.errors
            .iter()
            .filter(|(e, _)| e.is_transport())
            .map(|(_, count)| count)
            .sum()
    }

    pub fn targets(&self) -> usize {
        self.targets
    }

    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Non-zero error counters, in category order.
    pub fn error_counts(&self) -> Vec<(ErrorType, usize)> {
        self.errors
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(e, count)| (*e, *count))
            .collect()
    }

    /// Folds another worker's counters into this one.
    pub fn merge(&mut self, other: &ProcessingStats) {
        for (error, count) in &other.errors {
            *self.errors.entry(*error).or_insert(0) += count;
        }
        self.targets += other.targets;
        self.requests += other.requests;
    }
}

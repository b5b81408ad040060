//! Probe worker loop.
//!
//! Each worker owns one `TargetEvaluator` (and therefore one HTTP client) and
//! pulls URLs from the shared queue until it is closed and empty. Results and
//! counters stay local to the worker and are handed back when it finishes.

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::{mpsc, Mutex};

use crate::app::print_finding;
use crate::error_handling::{ErrorType, ProcessingStats};
use crate::models::ScanResult;
use crate::probe::TargetEvaluator;

/// Shared receiving end of the URL queue.
pub(crate) type UrlQueue = Arc<Mutex<mpsc::Receiver<String>>>;

/// What one worker produced.
#[derive(Debug, Default)]
pub(crate) struct WorkerOutput {
    pub results: Vec<ScanResult>,
    pub stats: ProcessingStats,
}

/// Runs one worker until the queue is drained.
pub(crate) async fn run_worker(
    id: usize,
    evaluator: TargetEvaluator,
    queue: UrlQueue,
) -> WorkerOutput {
    let mut output = WorkerOutput::default();

    loop {
        // Lock only for the receive so other workers can pull while this one probes
        let next = queue.lock().await.recv().await;
        let Some(url) = next else {
            break;
        };

        output.stats.record_target();
        match evaluator.evaluate_url(&url, &mut output.stats).await {
            Ok(Some(result)) => {
                print_finding(&result);
                output.results.push(result);
            }
            Ok(None) => debug!("No origin reflected by {url}"),
            Err(e) => {
                output.stats.increment_error(ErrorType::UrlParseError);
                warn!("Skipping target: {e}");
            }
        }
    }

    debug!(
        "Worker {id} finished: {} targets, {} findings",
        output.stats.targets(),
        output.results.len()
    );
    output
}

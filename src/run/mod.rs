//! Scan orchestration.
//!
//! A fixed pool of workers shares one bounded URL queue fed by the URL
//! source. Each worker keeps its own results and counters; they are merged in
//! a single step after every worker has joined.

mod worker;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{info, warn};
use tokio::io::AsyncBufRead;
use tokio::sync::{mpsc, Mutex};

use crate::app::print_run_statistics;
use crate::config::Config;
use crate::error_handling::{ErrorType, ProcessingStats};
use crate::export::save_results;
use crate::input::{feed_urls, open_url_source};
use crate::models::ScanResult;
use crate::probe::TargetEvaluator;

use worker::run_worker;

/// Results of a scan run.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Number of URLs pulled from the input
    pub total_urls: usize,
    /// URLs skipped because they could not be parsed
    pub parse_failures: usize,
    /// Probe requests sent, including failed ones
    pub requests_sent: usize,
    /// Probe requests that failed at the transport level
    pub failed_requests: usize,
    /// Non-zero failure counters by category
    pub error_counts: Vec<(ErrorType, usize)>,
    /// One entry per target with at least one reflected origin, sorted by URL
    pub results: Vec<ScanResult>,
    /// Where results were saved, if an output file was configured
    pub output_path: Option<PathBuf>,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

impl ScanReport {
    /// Number of results that reflect an origin and allow credentials.
    pub fn exploitable(&self) -> usize {
        self.results.iter().filter(|r| r.is_exploitable()).count()
    }
}

/// Runs a CORS scan with the provided configuration.
///
/// Reads URLs from `config.input`, probes them concurrently and, once every
/// worker has finished, writes the results to `config.output` if set.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid or a probe client cannot be built
/// - The URL source cannot be opened or read
/// - The results file cannot be written (only after probing has completed)
///
/// # Example
///
/// ```no_run
/// use corsmisc::{run_scan, Config};
/// use std::path::PathBuf;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config {
///     input: PathBuf::from("urls.txt"),
///     output: Some(PathBuf::from("results.json")),
///     ..Default::default()
/// };
/// let report = run_scan(config).await?;
/// println!("{} targets reflect an origin", report.results.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_scan(config: Config) -> Result<ScanReport> {
    config.validate().context("Invalid configuration")?;

    if config.reads_stdin() {
        info!("Reading URLs from stdin");
    }
    let reader = open_url_source(&config.input)
        .await
        .context("Failed to open URL source")?;

    let mut report = dispatch(&config, reader).await?;

    if let Some(output) = &config.output {
        let written = save_results(output, &report.results).context("Failed to save results")?;
        report.output_path = Some(written);
    }

    print_run_statistics(&report);
    Ok(report)
}

/// Probes every URL read from `reader` using `config.concurrency` workers.
///
/// This is the dispatcher behind `run_scan`, exposed for callers that supply
/// their own URL source. Nothing is written to disk.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, a probe client cannot be
/// built, or reading from `reader` fails.
pub async fn probe_urls<R>(config: &Config, reader: R) -> Result<ScanReport>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    config.validate().context("Invalid configuration")?;
    dispatch(config, reader).await
}

/// Runs the worker pool over `reader` with an already validated `config`.
async fn dispatch<R>(config: &Config, reader: R) -> Result<ScanReport>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let start_time = Instant::now();

    let evaluators = (0..config.concurrency)
        .map(|_| TargetEvaluator::from_config(config))
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to initialize probe clients")?;

    let (sender, receiver) = mpsc::channel::<String>(config.concurrency);
    let queue = Arc::new(Mutex::new(receiver));

    let producer = tokio::spawn(feed_urls(reader, sender));

    let mut workers: FuturesUnordered<_> = evaluators
        .into_iter()
        .enumerate()
        .map(|(id, evaluator)| tokio::spawn(run_worker(id, evaluator, Arc::clone(&queue))))
        .collect();
    // Only workers hold the receiver now; if they all die the producer stops too.
    drop(queue);

    info!(
        "Probing with {} workers ({} mode)",
        config.concurrency,
        if config.all_origins { "all origins" } else { "first hit" }
    );

    let mut stats = ProcessingStats::new();
    let mut results = Vec::new();
    while let Some(joined) = workers.next().await {
        match joined {
            Ok(output) => {
                stats.merge(&output.stats);
                results.extend(output.results);
            }
            Err(join_error) => warn!("Worker panicked: {join_error:?}"),
        }
    }

    let queued = producer.await.context("URL source task panicked")??;
    if queued != stats.targets() {
        warn!(
            "{} of {queued} queued URLs were not processed",
            queued.saturating_sub(stats.targets())
        );
    }

    results.sort_by(|a, b| a.url.cmp(&b.url));

    Ok(ScanReport {
        total_urls: stats.targets(),
        parse_failures: stats.get_error_count(ErrorType::UrlParseError),
        requests_sent: stats.requests(),
        failed_requests: stats.failed_requests(),
        error_counts: stats.error_counts(),
        results,
        output_path: None,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}

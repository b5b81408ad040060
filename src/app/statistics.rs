//! End-of-run summary.

use log::info;

use crate::run::ScanReport;

/// Logs the run summary and the failure counters.
pub fn print_run_statistics(report: &ScanReport) {
    print_error_statistics(report);

    let findings = report.results.len();
    info!(
        "Probed {} URL{} with {} requests in {:.1}s: {} reflecting, {} exploitable, {} skipped",
        report.total_urls,
        if report.total_urls == 1 { "" } else { "s" },
        report.requests_sent,
        report.elapsed_seconds,
        findings,
        report.exploitable(),
        report.parse_failures
    );

    if let Some(path) = &report.output_path {
        info!("Results written to {}", path.display());
    }
}

fn print_error_statistics(report: &ScanReport) {
    let total: usize = report.error_counts.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return;
    }

    info!("Error Counts ({} total):", total);
    for (error_type, count) in &report.error_counts {
        info!("   {}: {}", error_type.as_str(), count);
    }
}

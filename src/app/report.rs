//! Per-target finding lines.

use colored::Colorize;

use crate::models::ScanResult;

/// Prints one finding to stdout.
///
/// Exploitable findings (credentials allowed) are tagged `[VULNERABLE]`,
/// everything else `[REFLECTED]`.
pub fn print_finding(result: &ScanResult) {
    println!("{}", format_finding(result));
}

fn format_finding(result: &ScanResult) -> String {
    let tag = if result.is_exploitable() {
        "[VULNERABLE]".red().bold()
    } else {
        "[REFLECTED]".yellow()
    };
    let acac = result.acac.as_deref().unwrap_or("-");
    format!(
        "{tag} {} origins=[{}] acac={acac}",
        result.url,
        result.acao.join(", ")
    )
}

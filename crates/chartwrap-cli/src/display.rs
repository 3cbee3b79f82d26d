//! Display formatting for CLI output
//!
//! Provides structured display for:
//! - Candidate tables offered for selection
//! - The resolved chart reference
//! - The materialize summary

use chartwrap_core::{ChartCandidate, ChartReference};
use chartwrap_helm::fetch::ValuesSource;
use console::style;

use crate::commands::materialize::MaterializeReport;

/// Render the numbered candidate table
pub fn format_candidates(candidates: &[ChartCandidate]) -> String {
    let mut out = format!(
        "{:>3}  {:<35} {:<15} {:<15} {}\n",
        "#", "NAME", "VERSION", "APP VERSION", "REPO"
    );
    out.push_str(&"-".repeat(80));
    out.push('\n');

    for (index, candidate) in candidates.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}  {:<35} {:<15} {:<15} {}\n",
            index + 1,
            candidate.full_name,
            candidate.version,
            candidate.app_version.as_deref().unwrap_or("-"),
            candidate.repo_name,
        ));
    }
    out
}

pub fn display_candidates(candidates: &[ChartCandidate]) {
    eprintln!();
    eprintln!(
        "{} Found {}",
        style("→").blue().bold(),
        pluralize(candidates.len(), "candidate", "candidates")
    );
    eprint!("{}", format_candidates(candidates));
}

pub fn display_resolved(reference: &ChartReference) {
    println!("{} Resolved chart", style("✓").green().bold());
    println!("  {:<12} {}", style("name:").dim(), reference.name);
    println!(
        "  {:<12} {}",
        style("version:").dim(),
        reference.version.as_deref().unwrap_or("latest")
    );
    println!(
        "  {:<12} {}",
        style("repository:").dim(),
        reference.repository_url.as_deref().unwrap_or("-")
    );
}

pub fn display_materialize_report(report: &MaterializeReport) {
    let mark = |ok: bool| {
        if ok {
            style("✓").green()
        } else {
            style("⚠").yellow()
        }
    };

    let source = match report.source {
        ValuesSource::Strategy(_) => style(report.source.to_string()).cyan(),
        _ => style(report.source.to_string()).yellow(),
    };

    println!(
        "{} values.yaml: {} nested under '{}' (from {})",
        mark(report.values_written),
        pluralize(report.values_keys, "key", "keys"),
        report.chart_key,
        source,
    );
    println!(
        "{} Chart.yaml: {}",
        mark(report.chart_patched),
        if report.chart_patched { "patched" } else { "skipped" }
    );
}

/// Pluralize a word based on count
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

//! Materialize command - fill the generated chart with upstream values
//!
//! Runs as the template's post-generation hook. Nothing in this phase is
//! allowed to abort generation: every failure is logged as a warning and
//! replaced with an empty or default value.

use chartwrap_core::defaults::{CHART_FILE, VALUES_FILE};
use chartwrap_core::values::merge_chart_values;
use chartwrap_core::{ChartMetadata, ChartReference, HandoffState, Values};
use chartwrap_helm::{ChartTool, ValuesSource, fetch_values};
use std::path::{Path, PathBuf};

use crate::display;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct MaterializeOptions {
    /// Root of the generated chart
    pub dir: PathBuf,
    pub handoff_file: PathBuf,
    /// Raw template values, used when neither the hand-off file nor the
    /// environment names a chart
    pub chart_name: Option<String>,
    pub chart_version: Option<String>,
    pub chart_repository: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MaterializeReport {
    pub chart_key: String,
    pub source: ValuesSource,
    pub values_keys: usize,
    pub values_written: bool,
    pub chart_patched: bool,
}

/// Run the materialize phase; always succeeds
pub fn run<T: ChartTool + ?Sized>(tool: &T, options: &MaterializeOptions) -> Result<()> {
    let Some(reference) = load_reference(options, HandoffState::from_env()) else {
        tracing::warn!("No chart name available; leaving generated files untouched");
        return Ok(());
    };

    tracing::info!("Materializing wrapper for {}", reference);
    let report = materialize(tool, &reference, &options.dir);
    display::display_materialize_report(&report);
    Ok(())
}

/// Pick the chart reference: hand-off file, then environment, then raw template values
///
/// The hand-off file is consumed whether or not it is usable.
pub fn load_reference(options: &MaterializeOptions, env: Option<HandoffState>) -> Option<ChartReference> {
    match HandoffState::consume(&options.handoff_file) {
        Ok(Some(state)) => {
            if let Some(reference) = state.into_reference() {
                tracing::debug!("Using hand-off record {}", options.handoff_file.display());
                return Some(reference);
            }
            tracing::warn!("Hand-off record has no chart name; ignoring it");
        }
        Ok(None) => {
            tracing::debug!("No hand-off record at {}", options.handoff_file.display());
        }
        Err(e) => {
            tracing::warn!("Ignoring hand-off record: {}", e);
        }
    }

    let env = env.unwrap_or(HandoffState {
        chart_name: String::new(),
        chart_version: None,
        chart_repository: None,
    });

    let pick = |from_env: Option<&str>, from_cli: Option<&str>| {
        from_env
            .filter(|v| !v.trim().is_empty())
            .or(from_cli)
            .map(str::to_string)
    };

    let name = pick(Some(env.chart_name.as_str()), options.chart_name.as_deref());
    let version = pick(env.chart_version.as_deref(), options.chart_version.as_deref());
    let repository = pick(env.chart_repository.as_deref(), options.chart_repository.as_deref());

    ChartReference::from_raw(name.as_deref(), version.as_deref(), repository.as_deref())
}

/// Fetch values, merge them into `values.yaml` and patch `Chart.yaml`
pub fn materialize<T: ChartTool + ?Sized>(tool: &T, reference: &ChartReference, dir: &Path) -> MaterializeReport {
    let outcome = fetch_values(tool, reference);
    let chart_key = reference.bare_name().to_string();
    let values_keys = outcome.values.len();

    let values_written = merge_values_file(&dir.join(VALUES_FILE), &chart_key, outcome.values);
    let chart_patched = patch_chart_file(&dir.join(CHART_FILE), reference);

    MaterializeReport {
        chart_key,
        source: outcome.source,
        values_keys,
        values_written,
        chart_patched,
    }
}

/// Nest `fetched` under `chart_key` in the values file
pub fn merge_values_file(path: &Path, chart_key: &str, fetched: Values) -> bool {
    let existing = Values::load_or_empty(path);
    let merged = merge_chart_values(existing, chart_key, fetched);

    match merged.write_to(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Could not write {}: {}", path.display(), e);
            false
        }
    }
}

/// Apply the reference to `Chart.yaml`, skipping a missing or unreadable file
pub fn patch_chart_file(path: &Path, reference: &ChartReference) -> bool {
    if !path.exists() {
        tracing::warn!("{} not found, skipping metadata patch", path.display());
        return false;
    }

    let mut chart = match ChartMetadata::from_file(path) {
        Ok(chart) => chart,
        Err(e) => {
            tracing::warn!("Could not read {}: {}; skipping metadata patch", path.display(), e);
            return false;
        }
    };

    chart.apply(reference);

    match chart.write_to(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Could not write {}: {}", path.display(), e);
            false
        }
    }
}

//! Ordered retrieval of an upstream chart's default values
//!
//! Each strategy either yields YAML text or reports that it has nothing.
//! Strategies run in `CHAIN` order and the first usable text wins. Nothing
//! here fails: every problem is logged and the chain moves on, ending at
//! built-in defaults or an empty mapping.

use chartwrap_core::{ChartReference, Values};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::tool::ChartTool;
use crate::well_known;

/// One way of obtaining default values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuesStrategy {
    /// `show values <chart> --repo <url>`
    RepositoryUrl,
    /// `show values <repo/chart>`
    PrefixedName,
    /// Debug dry-run, values scraped from its report
    TemplateDebug,
    /// Pull and unpack the archive, read its `values.yaml`
    PullArchive,
}

/// Strategies in the order they are tried
pub const CHAIN: [ValuesStrategy; 4] = [
    ValuesStrategy::RepositoryUrl,
    ValuesStrategy::PrefixedName,
    ValuesStrategy::TemplateDebug,
    ValuesStrategy::PullArchive,
];

impl ValuesStrategy {
    pub fn name(self) -> &'static str {
        match self {
            ValuesStrategy::RepositoryUrl => "repository-url",
            ValuesStrategy::PrefixedName => "prefixed-name",
            ValuesStrategy::TemplateDebug => "template-debug",
            ValuesStrategy::PullArchive => "pull-archive",
        }
    }

    /// Run this strategy; `Ok(None)` means not applicable or nothing found
    pub fn attempt<T: ChartTool + ?Sized>(
        self,
        tool: &T,
        reference: &ChartReference,
    ) -> Result<Option<String>> {
        let version = reference.version.as_deref();
        let repo_url = reference.repository_url.as_deref();

        let text = match self {
            ValuesStrategy::RepositoryUrl => {
                let Some(url) = repo_url else {
                    return Ok(None);
                };
                tool.show_values(reference.bare_name(), Some(url), version)?
            }
            ValuesStrategy::PrefixedName => {
                if repo_url.is_some() || reference.repo_prefix().is_none() {
                    return Ok(None);
                }
                tool.show_values(&reference.name, None, version)?
            }
            ValuesStrategy::TemplateDebug => {
                let output = tool.template_debug(reference.chart_arg(), repo_url, version)?;
                match crate::parse::extract_debug_values(&output) {
                    Some(body) => body,
                    None => return Ok(None),
                }
            }
            ValuesStrategy::PullArchive => {
                let scratch = tempfile::Builder::new()
                    .prefix("chartwrap-pull-")
                    .tempdir()?;
                tool.pull_untar(reference.chart_arg(), repo_url, version, scratch.path())?;
                match find_values_file(scratch.path(), reference.bare_name()) {
                    Some(path) => std::fs::read_to_string(path)?,
                    None => return Ok(None),
                }
            }
        };

        if text.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }
}

impl fmt::Display for ValuesStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the final values came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuesSource {
    Strategy(ValuesStrategy),
    WellKnown,
    Empty,
}

impl fmt::Display for ValuesSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValuesSource::Strategy(strategy) => write!(f, "{}", strategy),
            ValuesSource::WellKnown => f.write_str("built-in defaults"),
            ValuesSource::Empty => f.write_str("empty values"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub values: Values,
    pub source: ValuesSource,
}

/// Obtain the chart's default values, never failing
pub fn fetch_values<T: ChartTool + ?Sized>(tool: &T, reference: &ChartReference) -> FetchOutcome {
    match tool.version() {
        Ok(version) => {
            tracing::debug!("Using package manager {}", version);
            if let Some(outcome) = run_chain(tool, reference) {
                return outcome;
            }
        }
        Err(e) => {
            tracing::warn!("Package manager unavailable, skipping values retrieval: {}", e);
        }
    }

    match well_known::defaults_for(reference.bare_name()) {
        Some(values) => {
            tracing::warn!("Using built-in defaults for {}", reference.bare_name());
            FetchOutcome {
                values,
                source: ValuesSource::WellKnown,
            }
        }
        None => {
            tracing::warn!("No default values found for {}; using empty values", reference.name);
            FetchOutcome {
                values: Values::new(),
                source: ValuesSource::Empty,
            }
        }
    }
}

fn run_chain<T: ChartTool + ?Sized>(tool: &T, reference: &ChartReference) -> Option<FetchOutcome> {
    for strategy in CHAIN {
        match strategy.attempt(tool, reference) {
            Ok(Some(text)) => {
                tracing::info!("Fetched values for {} via {}", reference.name, strategy);
                return Some(FetchOutcome {
                    values: Values::parse_or_empty(&text, strategy.name()),
                    source: ValuesSource::Strategy(strategy),
                });
            }
            Ok(None) => {
                tracing::debug!("Strategy {} had no result for {}", strategy, reference.name);
            }
            Err(e) => {
                tracing::warn!("Strategy {} failed for {}: {}", strategy, reference.name, e);
            }
        }
    }
    None
}

/// `<dir>/<chart>/values.yaml`, else the first `<dir>/*/values.yaml`
fn find_values_file(dir: &Path, chart: &str) -> Option<PathBuf> {
    let direct = dir.join(chart).join("values.yaml");
    if direct.is_file() {
        return Some(direct);
    }

    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    entries.sort();

    entries
        .into_iter()
        .map(|path| path.join("values.yaml"))
        .find(|path| path.is_file())
}

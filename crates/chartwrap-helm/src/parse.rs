//! Parsing of helm's machine-readable and debug output

use chartwrap_core::{ChartCandidate, RepositoryEntry};
use serde::Deserialize;

/// One row of `helm search repo -o json`
#[derive(Debug, Deserialize)]
struct SearchRow {
    name: String,
    version: String,
    #[serde(default)]
    app_version: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Parse `helm search repo -o json`
///
/// Blank output (older helm releases print nothing for an empty result) is
/// an empty list.
pub fn parse_search_output(json: &str) -> serde_json::Result<Vec<ChartCandidate>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<SearchRow> = serde_json::from_str(json)?;
    Ok(rows
        .into_iter()
        .map(|row| ChartCandidate {
            app_version: row.app_version.filter(|v| !v.is_empty()),
            description: row.description.filter(|d| !d.is_empty()),
            ..ChartCandidate::new(row.name, row.version)
        })
        .collect())
}

/// Parse `helm repo list -o json`
pub fn parse_repo_list(json: &str) -> serde_json::Result<Vec<RepositoryEntry>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(json)
}

const USER_SUPPLIED: &str = "USER-SUPPLIED VALUES:";
const COMPUTED: &str = "COMPUTED VALUES:";
const SECTION_MARKERS: &[&str] = &[USER_SUPPLIED, COMPUTED, "HOOKS:", "MANIFEST:", "NOTES:"];

/// Extract default values from debug dry-run output
///
/// Prefers the `USER-SUPPLIED VALUES:` section and falls back to
/// `COMPUTED VALUES:`. A section that is blank or `{}` does not count.
pub fn extract_debug_values(output: &str) -> Option<String> {
    section_body(output, USER_SUPPLIED).or_else(|| section_body(output, COMPUTED))
}

fn section_body(output: &str, marker: &str) -> Option<String> {
    let mut lines = output.lines();
    lines.find(|line| line.trim_start().starts_with(marker))?;

    let body: Vec<&str> = lines
        .take_while(|line| {
            line.trim_end() != "---" && !SECTION_MARKERS.iter().any(|m| line.starts_with(m))
        })
        .collect();

    let text = body.join("\n");
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "{}" {
        None
    } else {
        Some(format!("{}\n", text.trim_end()))
    }
}

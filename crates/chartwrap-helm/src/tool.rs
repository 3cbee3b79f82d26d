//! The package-manager port

use chartwrap_core::{ChartCandidate, RepositoryEntry};
use std::path::Path;

use crate::error::Result;

/// Operations chartwrap needs from a chart package manager
///
/// `chart` arguments are passed through as given: a bare chart name when
/// `repo_url` is set, otherwise a `repo/chart` name.
pub trait ChartTool {
    /// Short version string; doubles as an availability check
    fn version(&self) -> Result<String>;

    /// Search configured repositories, all versions included
    fn search_repo(&self, query: &str) -> Result<Vec<ChartCandidate>>;

    fn repo_list(&self) -> Result<Vec<RepositoryEntry>>;

    fn repo_add(&self, name: &str, url: &str) -> Result<()>;

    fn repo_update(&self, name: &str) -> Result<()>;

    /// Raw YAML of the chart's default values
    fn show_values(&self, chart: &str, repo_url: Option<&str>, version: Option<&str>) -> Result<String>;

    /// Raw text of a debug templating dry-run
    fn template_debug(&self, chart: &str, repo_url: Option<&str>, version: Option<&str>) -> Result<String>;

    /// Pull the chart archive and unpack it under `dest`
    fn pull_untar(
        &self,
        chart: &str,
        repo_url: Option<&str>,
        version: Option<&str>,
        dest: &Path,
    ) -> Result<()>;

    /// Resolve a repository name to its configured URL
    fn repo_url(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .repo_list()?
            .into_iter()
            .find(|repo| repo.name == name)
            .map(|repo| repo.url))
    }
}

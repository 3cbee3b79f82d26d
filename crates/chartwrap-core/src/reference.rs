//! Chart references and the rows reported by the package manager

use serde::{Deserialize, Serialize};
use std::fmt;

/// A chart resolved (fully or partially) to name, version and repository URL
///
/// `name` is either `repo/chart` or a bare chart name. A missing version means
/// "whatever is latest"; a missing repository URL means the chart is addressed
/// through the locally configured repository prefix, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartReference {
    pub name: String,
    pub version: Option<String>,
    pub repository_url: Option<String>,
}

impl ChartReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            repository_url: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into());
        self
    }

    /// Build a reference from raw, possibly unrendered template values
    ///
    /// Returns `None` when no usable chart name is present.
    pub fn from_raw(name: Option<&str>, version: Option<&str>, repository: Option<&str>) -> Option<Self> {
        let name = normalize_field(name)?;
        Some(Self {
            name,
            version: normalize_field(version),
            repository_url: normalize_field(repository),
        })
    }

    /// Chart name without any repository prefix
    pub fn bare_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Repository prefix of a `repo/chart` name
    pub fn repo_prefix(&self) -> Option<&str> {
        self.name
            .split_once('/')
            .map(|(prefix, _)| prefix)
            .filter(|prefix| !prefix.is_empty())
    }

    /// Chart argument for a helm call: bare name when scoped by `--repo`
    pub fn chart_arg(&self) -> &str {
        if self.repository_url.is_some() {
            self.bare_name()
        } else {
            &self.name
        }
    }
}

impl fmt::Display for ChartReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(version) = &self.version {
            write!(f, "@{}", version)?;
        }
        if let Some(url) = &self.repository_url {
            write!(f, " ({})", url)?;
        }
        Ok(())
    }
}

/// Treat empty strings and unrendered `{{ ... }}` placeholders as absent
pub fn normalize_field(raw: Option<&str>) -> Option<String> {
    let value = raw?.trim();
    if value.is_empty() || value.contains("{{") {
        None
    } else {
        Some(value.to_string())
    }
}

/// One row of a repository search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartCandidate {
    /// `repo/chart`
    pub full_name: String,
    pub version: String,
    /// Always the prefix before `/` in `full_name`
    pub repo_name: String,
    #[serde(default)]
    pub app_version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ChartCandidate {
    pub fn new(full_name: impl Into<String>, version: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let repo_name = full_name
            .split_once('/')
            .map(|(repo, _)| repo.to_string())
            .unwrap_or_default();
        Self {
            full_name,
            version: version.into(),
            repo_name,
            app_version: None,
            description: None,
        }
    }

    pub fn bare_name(&self) -> &str {
        self.full_name.rsplit('/').next().unwrap_or(&self.full_name)
    }
}

/// A configured package-manager repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryEntry {
    pub name: String,
    pub url: String,
}

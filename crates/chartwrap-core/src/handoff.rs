//! Hand-off record between the resolve and materialize phases
//!
//! The phases run as separate processes. The resolver writes a small JSON
//! file; the materializer reads it once and deletes it. Environment
//! variables are only a fallback for when no file exists.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::defaults::{ENV_CHART_NAME, ENV_CHART_REPOSITORY, ENV_CHART_VERSION};
use crate::error::{CoreError, Result};
use crate::reference::{ChartReference, normalize_field};

/// Serialized hand-off record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffState {
    pub chart_name: String,
    #[serde(default)]
    pub chart_version: Option<String>,
    #[serde(default)]
    pub chart_repository: Option<String>,
}

impl HandoffState {
    pub fn from_reference(reference: &ChartReference) -> Self {
        Self {
            chart_name: reference.name.clone(),
            chart_version: reference.version.clone(),
            chart_repository: reference.repository_url.clone(),
        }
    }

    /// Convert to a reference, treating blank fields as absent
    pub fn into_reference(self) -> Option<ChartReference> {
        ChartReference::from_raw(
            Some(&self.chart_name),
            self.chart_version.as_deref(),
            self.chart_repository.as_deref(),
        )
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read the record without consuming it
    pub fn read(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        let state = serde_json::from_str(&content).map_err(|e| CoreError::InvalidHandoff {
            message: format!("{}: {}", path.display(), e),
        })?;
        Ok(Some(state))
    }

    /// Read the record and delete the file
    ///
    /// The file is deleted even when it cannot be parsed, so a corrupt record
    /// never leaks into a later run.
    pub fn consume(path: &Path) -> Result<Option<Self>> {
        let state = Self::read(path);
        if !path.exists() {
            return state;
        }
        settle_consumed(path, state, std::fs::remove_file(path))
    }

    /// Delete the file; `false` when there was nothing to delete
    pub fn remove(path: &Path) -> Result<bool> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Rebuild the record from `CHARTWRAP_CHART_*` environment variables
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let chart_name = normalize_field(lookup(ENV_CHART_NAME).as_deref())?;
        Some(Self {
            chart_name,
            chart_version: normalize_field(lookup(ENV_CHART_VERSION).as_deref()),
            chart_repository: normalize_field(lookup(ENV_CHART_REPOSITORY).as_deref()),
        })
    }
}

/// A record that parsed is returned even when deleting its file failed
fn settle_consumed(
    path: &Path,
    state: Result<Option<HandoffState>>,
    removed: std::io::Result<()>,
) -> Result<Option<HandoffState>> {
    if let Err(e) = removed {
        tracing::warn!("Could not delete hand-off record {}: {}", path.display(), e);
        if state.is_ok() {
            return state;
        }
        return Err(e.into());
    }
    state
}

/// Merge the resolved chart into a JSON template-context file
///
/// Other keys of the context object are preserved.
pub fn update_template_context(path: &Path, state: &HandoffState) -> Result<()> {
    let content = std::fs::read_to_string(path)?;
    let mut context: serde_json::Value = serde_json::from_str(&content)?;
    let Some(object) = context.as_object_mut() else {
        return Err(CoreError::NotAMapping {
            what: path.display().to_string(),
            found: "a non-object JSON value".to_string(),
        });
    };

    object.insert("chart_name".to_string(), state.chart_name.clone().into());
    object.insert("chart_version".to_string(), state.chart_version.clone().into());
    object.insert(
        "chart_repository".to_string(),
        state.chart_repository.clone().into(),
    );

    std::fs::write(path, serde_json::to_string_pretty(&context)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_consume_deletes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("handoff.json");
        let reference = ChartReference::new("bitnami/redis")
            .with_version("18.1.0")
            .with_repository_url("https://charts.bitnami.com/bitnami");

        HandoffState::from_reference(&reference).write(&path).unwrap();

        let peeked = HandoffState::read(&path).unwrap().unwrap();
        assert_eq!(peeked.chart_name, "bitnami/redis");
        assert!(path.exists());

        let consumed = HandoffState::consume(&path).unwrap().unwrap();
        assert_eq!(consumed.into_reference().unwrap(), reference);
        assert!(!path.exists());
        assert!(HandoffState::consume(&path).unwrap().is_none());
    }

    #[test]
    fn test_schema_field_names() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("handoff.json");
        std::fs::write(
            &path,
            r#"{"chart_name":"x","chart_version":"1.2.3","chart_repository":"http://r"}"#,
        )
        .unwrap();

        let reference = HandoffState::consume(&path)
            .unwrap()
            .unwrap()
            .into_reference()
            .unwrap();
        assert_eq!(reference.name, "x");
        assert_eq!(reference.version.as_deref(), Some("1.2.3"));
        assert_eq!(reference.repository_url.as_deref(), Some("http://r"));
    }

    #[test]
    fn test_corrupt_record_is_removed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("handoff.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            HandoffState::consume(&path),
            Err(CoreError::InvalidHandoff { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_delete_keeps_parsed_record() {
        let path = Path::new("handoff.json");
        let state = HandoffState {
            chart_name: "redis".to_string(),
            chart_version: None,
            chart_repository: None,
        };
        let denied = || std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");

        let kept = settle_consumed(path, Ok(Some(state.clone())), Err(denied())).unwrap();
        assert_eq!(kept, Some(state));

        let corrupt = Err(CoreError::InvalidHandoff {
            message: "broken".to_string(),
        });
        assert!(matches!(
            settle_consumed(path, corrupt, Err(denied())),
            Err(CoreError::Io(_))
        ));
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_CHART_NAME, "nginx"),
            (ENV_CHART_VERSION, ""),
            (ENV_CHART_REPOSITORY, "https://charts.example.com"),
        ]);
        let state = HandoffState::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(state.chart_name, "nginx");
        assert_eq!(state.chart_version, None);
        assert_eq!(state.chart_repository.as_deref(), Some("https://charts.example.com"));

        assert!(HandoffState::from_lookup(|_| None).is_none());
    }

    #[test]
    fn test_update_template_context_preserves_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cookiecutter.json");
        std::fs::write(&path, r#"{"project_slug":"wrapper","chart_name":"my-chart"}"#).unwrap();

        let state = HandoffState {
            chart_name: "redis".to_string(),
            chart_version: Some("18.1.0".to_string()),
            chart_repository: None,
        };
        update_template_context(&path, &state).unwrap();

        let context: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(context["project_slug"], "wrapper");
        assert_eq!(context["chart_name"], "redis");
        assert_eq!(context["chart_version"], "18.1.0");
        assert!(context["chart_repository"].is_null());
    }

    #[test]
    fn test_remove_reports_absence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("handoff.json");
        assert!(!HandoffState::remove(&path).unwrap());
        std::fs::write(&path, "{}").unwrap();
        assert!(HandoffState::remove(&path).unwrap());
    }
}

//! The generated chart's `Chart.yaml`
//!
//! Only a handful of fields are patched; everything else in the document is
//! kept verbatim and in order.

use serde_yaml::{Mapping, Sequence, Value};
use std::path::Path;

use crate::defaults::{ANY_VERSION, FALLBACK_APP_VERSION, FALLBACK_CHART_VERSION};
use crate::error::{CoreError, Result};
use crate::reference::ChartReference;
use crate::values::value_kind;

/// Chart metadata document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartMetadata(pub Mapping);

impl ChartMetadata {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        match serde_yaml::from_str::<Value>(yaml)? {
            Value::Null => Ok(Self::default()),
            Value::Mapping(map) => Ok(Self(map)),
            other => Err(CoreError::NotAMapping {
                what: "Chart.yaml".to_string(),
                found: value_kind(&other).to_string(),
            }),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.0)?)
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_yaml()?)?;
        Ok(())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.0.insert(Value::String(key.to_string()), value);
    }

    /// Patch description, versions, sources and the upstream dependency
    ///
    /// - `description` names the wrapped chart
    /// - `version` / `appVersion` take the resolved version, else
    ///   `0.1.0` / `latest`
    /// - `sources` becomes `[url]` when the repository URL is known
    /// - the upstream chart is upserted into `dependencies` when the
    ///   repository URL is known
    pub fn apply(&mut self, reference: &ChartReference) {
        let bare = reference.bare_name();

        self.set(
            "description",
            Value::String(format!("A wrapper Helm chart for {}", bare)),
        );

        let version = reference.version.as_deref();
        self.set(
            "version",
            Value::String(version.unwrap_or(FALLBACK_CHART_VERSION).to_string()),
        );
        self.set(
            "appVersion",
            Value::String(version.unwrap_or(FALLBACK_APP_VERSION).to_string()),
        );

        if let Some(url) = &reference.repository_url {
            self.set("sources", Value::Sequence(vec![Value::String(url.clone())]));
            self.upsert_dependency(bare, version.unwrap_or(ANY_VERSION), url);
        }
    }

    fn upsert_dependency(&mut self, name: &str, version: &str, repository: &str) {
        let mut entry = Mapping::new();
        entry.insert("name".into(), name.into());
        entry.insert("version".into(), version.into());
        entry.insert("repository".into(), repository.into());

        let Some(Value::Sequence(dependencies)) = self.0.get_mut("dependencies") else {
            let dependencies: Sequence = vec![Value::Mapping(entry)];
            self.set("dependencies", Value::Sequence(dependencies));
            return;
        };

        let existing = dependencies
            .iter_mut()
            .filter_map(Value::as_mapping_mut)
            .find(|dep| dep.get("name").and_then(Value::as_str) == Some(name));

        match existing {
            Some(dep) => {
                dep.insert("version".into(), version.into());
                dep.insert("repository".into(), repository.into());
            }
            None => dependencies.push(Value::Mapping(entry)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATED: &str = r#"apiVersion: v2
name: my-wrapper
description: placeholder
type: application
version: 0.0.1
appVersion: "0.0.1"
"#;

    #[test]
    fn test_apply_resolved_reference() {
        let mut chart = ChartMetadata::from_yaml(GENERATED).unwrap();
        let reference = ChartReference::new("bitnami/redis")
            .with_version("18.1.0")
            .with_repository_url("https://charts.bitnami.com/bitnami");

        chart.apply(&reference);

        insta::assert_snapshot!(chart.to_yaml().unwrap(), @r"
        apiVersion: v2
        name: my-wrapper
        description: A wrapper Helm chart for redis
        type: application
        version: 18.1.0
        appVersion: 18.1.0
        sources:
        - https://charts.bitnami.com/bitnami
        dependencies:
        - name: redis
          version: 18.1.0
          repository: https://charts.bitnami.com/bitnami
        ");
    }

    #[test]
    fn test_apply_unresolved_uses_fallbacks() {
        let mut chart = ChartMetadata::from_yaml(GENERATED).unwrap();

        chart.apply(&ChartReference::new("demo"));

        assert_eq!(chart.get_str("version"), Some("0.1.0"));
        assert_eq!(chart.get_str("appVersion"), Some("latest"));
        assert_eq!(chart.get_str("description"), Some("A wrapper Helm chart for demo"));
        assert!(chart.0.get("sources").is_none());
        assert!(chart.0.get("dependencies").is_none());
    }

    #[test]
    fn test_existing_dependency_is_updated_not_duplicated() {
        let mut chart = ChartMetadata::from_yaml(
            r#"name: wrapper
dependencies:
  - name: redis
    version: 1.0.0
    repository: https://old.example.com
    condition: redis.enabled
  - name: other
    version: 2.0.0
"#,
        )
        .unwrap();
        let reference = ChartReference::new("redis")
            .with_version("2.0.0")
            .with_repository_url("https://new.example.com");

        chart.apply(&reference);
        chart.apply(&reference);

        let deps = chart.0.get("dependencies").and_then(Value::as_sequence).unwrap();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].get("version").and_then(Value::as_str), Some("2.0.0"));
        assert_eq!(
            deps[0].get("repository").and_then(Value::as_str),
            Some("https://new.example.com")
        );
        assert_eq!(deps[0].get("condition").and_then(Value::as_str), Some("redis.enabled"));
    }

    #[test]
    fn test_rejects_non_mapping() {
        assert!(matches!(
            ChartMetadata::from_yaml("- not\n- a chart\n"),
            Err(CoreError::NotAMapping { .. })
        ));
    }
}

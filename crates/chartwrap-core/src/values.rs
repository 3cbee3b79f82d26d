//! Values documents with chart-scoped merge
//!
//! A wrapper chart nests the upstream chart's defaults under a single
//! top-level key named after the chart. Everything else already present in
//! the generated `values.yaml` is kept in its original order.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::Path;

use crate::error::{CoreError, Result};

/// Ordered values mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values(pub Mapping);

impl Values {
    /// Create empty values
    pub fn new() -> Self {
        Self(Mapping::new())
    }

    /// Parse values from YAML
    ///
    /// An empty or comment-only document is an empty mapping; any other
    /// non-mapping document is an error.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::new());
        }
        match serde_yaml::from_str::<Value>(yaml)? {
            Value::Null => Ok(Self::new()),
            Value::Mapping(map) => Ok(Self(map)),
            other => Err(CoreError::NotAMapping {
                what: "values document".to_string(),
                found: value_kind(&other).to_string(),
            }),
        }
    }

    /// Load values from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Load values from a file, degrading to an empty mapping
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!("{} not found, starting from empty values", path.display());
            return Self::new();
        }
        Self::from_file(path).unwrap_or_else(|e| {
            tracing::warn!("Could not read {}: {}; starting from empty values", path.display(), e);
            Self::new()
        })
    }

    /// Parse fetched text, degrading to an empty mapping
    pub fn parse_or_empty(text: &str, source: &str) -> Self {
        Self::from_yaml(text).unwrap_or_else(|e| {
            tracing::warn!("Values from {} are not usable: {}; using empty values", source, e);
            Self::new()
        })
    }

    /// Insert or replace a top-level key
    ///
    /// A key that already exists keeps its position.
    pub fn insert(&mut self, key: &str, value: Value) -> Option<Value> {
        self.0.insert(Value::String(key.to_string()), value)
    }

    /// Nest another document under `chart_key`
    pub fn insert_chart(&mut self, chart_key: &str, chart_values: Values) -> Option<Value> {
        self.insert(chart_key, Value::Mapping(chart_values.0))
    }

    /// Get a top-level value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Top-level keys in document order
    pub fn keys(&self) -> Vec<&str> {
        self.0.keys().filter_map(Value::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize in block style
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.0)?)
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_yaml()?)?;
        Ok(())
    }
}

/// `existing ∪ {chart_key: fetched}`, the fetched entry winning
pub fn merge_chart_values(existing: Values, chart_key: &str, fetched: Values) -> Values {
    let mut merged = existing;
    merged.insert_chart(chart_key, fetched);
    merged
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_merge_nests_under_chart_key() {
        let existing = Values::from_yaml("foo: 1\n").unwrap();
        let fetched = Values::from_yaml("bar: 2\n").unwrap();

        let merged = merge_chart_values(existing, "demo", fetched);

        insta::assert_snapshot!(merged.to_yaml().unwrap(), @r"
        foo: 1
        demo:
          bar: 2
        ");
    }

    #[test]
    fn test_merge_replaces_existing_key_in_place() {
        let existing = Values::from_yaml(
            r#"
global:
  env: dev
demo:
  stale: true
tail: x
"#,
        )
        .unwrap();
        let fetched = Values::from_yaml("fresh: true\n").unwrap();

        let merged = merge_chart_values(existing, "demo", fetched);

        assert_eq!(merged.keys(), vec!["global", "demo", "tail"]);
        let demo = merged.get("demo").unwrap();
        assert_eq!(demo.get("fresh"), Some(&Value::Bool(true)));
        assert!(demo.get("stale").is_none());
    }

    #[test]
    fn test_merge_is_idempotent() {
        let fetched = Values::from_yaml("image:\n  tag: \"1.0\"\n").unwrap();

        let once = merge_chart_values(Values::new(), "demo", fetched.clone());
        let twice = merge_chart_values(once.clone(), "demo", fetched);

        assert_eq!(once.to_yaml().unwrap(), twice.to_yaml().unwrap());
    }

    #[test]
    fn test_from_yaml_edge_cases() {
        assert!(Values::from_yaml("").unwrap().is_empty());
        assert!(Values::from_yaml("# only a comment\n").unwrap().is_empty());
        assert!(Values::from_yaml("{}").unwrap().is_empty());
        assert!(matches!(
            Values::from_yaml("- a\n- b\n"),
            Err(CoreError::NotAMapping { .. })
        ));
        assert!(matches!(
            Values::from_yaml("key: [unclosed"),
            Err(CoreError::YamlParse(_))
        ));
    }

    #[test]
    fn test_parse_or_empty_never_fails() {
        assert!(Values::parse_or_empty("key: [unclosed", "test").is_empty());
        assert!(Values::parse_or_empty("just a string", "test").is_empty());
        assert_eq!(Values::parse_or_empty("a: 1", "test").len(), 1);
    }

    #[test]
    fn test_empty_chart_values_render_as_flow_mapping() {
        let merged = merge_chart_values(Values::new(), "demo", Values::new());
        assert_eq!(merged.to_yaml().unwrap(), "demo: {}\n");
    }

    #[test]
    fn test_load_or_empty() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("values.yaml");
        assert!(Values::load_or_empty(&missing).is_empty());

        std::fs::write(&missing, "replicas: [").unwrap();
        assert!(Values::load_or_empty(&missing).is_empty());

        std::fs::write(&missing, "replicas: 3\n").unwrap();
        assert_eq!(Values::load_or_empty(&missing).keys(), vec!["replicas"]);
    }
}

//! Fixed names and fallbacks shared by both phases

/// Chart name the template ships with before the operator overrides it
pub const PLACEHOLDER_CHART_NAME: &str = "my-chart";

/// Default hand-off file, relative to the working directory
pub const HANDOFF_FILE_NAME: &str = ".chartwrap-handoff.json";

/// Maximum number of versions offered per repository
pub const MAX_VERSIONS_PER_REPO: usize = 5;

/// `Chart.yaml` version when no upstream version was resolved
pub const FALLBACK_CHART_VERSION: &str = "0.1.0";

/// `Chart.yaml` appVersion when no upstream version was resolved
pub const FALLBACK_APP_VERSION: &str = "latest";

/// Dependency version constraint when no upstream version was resolved
pub const ANY_VERSION: &str = "*";

pub const VALUES_FILE: &str = "values.yaml";
pub const CHART_FILE: &str = "Chart.yaml";

/// Environment fallbacks for the hand-off record
pub const ENV_CHART_NAME: &str = "CHARTWRAP_CHART_NAME";
pub const ENV_CHART_VERSION: &str = "CHARTWRAP_CHART_VERSION";
pub const ENV_CHART_REPOSITORY: &str = "CHARTWRAP_CHART_REPOSITORY";

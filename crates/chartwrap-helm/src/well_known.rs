//! Built-in defaults for a few widely used charts
//!
//! Only consulted when every retrieval strategy has failed, so that the most
//! common wrappers still come out with a usable starting point offline.

use chartwrap_core::Values;

/// Minimal default values for a recognised chart name
pub fn defaults_for(chart: &str) -> Option<Values> {
    let yaml = match chart {
        "nginx" => {
            r#"replicaCount: 1
image:
  repository: nginx
  pullPolicy: IfNotPresent
service:
  type: ClusterIP
  port: 80
"#
        }
        "redis" => {
            r#"architecture: replication
auth:
  enabled: true
master:
  persistence:
    enabled: true
    size: 8Gi
replica:
  replicaCount: 3
"#
        }
        "postgresql" => {
            r#"auth:
  username: ""
  database: ""
primary:
  persistence:
    enabled: true
    size: 8Gi
"#
        }
        _ => return None,
    };

    Values::from_yaml(yaml).ok()
}

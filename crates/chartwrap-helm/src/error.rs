//! Error types for package-manager operations

use thiserror::Error;

/// Package-manager operation errors
#[derive(Debug, Error)]
pub enum HelmError {
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Unexpected output from `{command}`: {message}")]
    InvalidOutput { command: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HelmError {
    /// Whether a failed command reported that no repositories are configured
    pub fn is_no_repositories(&self) -> bool {
        match self {
            HelmError::CommandFailed { stderr, .. } => {
                stderr.to_lowercase().contains("no repositories")
            }
            _ => false,
        }
    }
}

/// Result type for package-manager operations
pub type Result<T> = std::result::Result<T, HelmError>;

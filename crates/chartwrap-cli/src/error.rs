//! CLI error types with exit code handling
//!
//! Only the resolve phase produces these; materialize degrades instead of
//! failing.

use miette::Diagnostic;
use thiserror::Error;

use crate::commands::resolve::ResolveError;
use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Missing or unusable operator input
    #[error("Input error: {message}")]
    #[diagnostic(code(chartwrap::cli::input))]
    Input {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// The search returned nothing
    #[error("No charts found for '{query}' in the configured repositories")]
    #[diagnostic(code(chartwrap::cli::no_charts))]
    NoCharts {
        query: String,
        #[help]
        help: Option<String>,
    },

    /// Search index and repository list disagree
    #[error("Repository error: {message}")]
    #[diagnostic(code(chartwrap::cli::repository))]
    Repository {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// The package manager could not be run or exited non-zero
    #[error("Command failed: {message}")]
    #[diagnostic(code(chartwrap::cli::command))]
    Command {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// IO error (hand-off or context file)
    #[error("IO error: {message}")]
    #[diagnostic(code(chartwrap::cli::io))]
    Io { message: String },

    /// Wrapped error for passthrough (stores the formatted message)
    #[error("{message}")]
    #[diagnostic(code(chartwrap::cli::error))]
    Other { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Input { .. } => exit_codes::INPUT_ERROR,
            CliError::NoCharts { .. } => exit_codes::NO_CHARTS,
            CliError::Repository { .. } => exit_codes::REPOSITORY_ERROR,
            CliError::Command { .. } => exit_codes::COMMAND_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Other { .. } => exit_codes::ERROR,
        }
    }

    /// Create an input error with help text
    pub fn input_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<ResolveError> for CliError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::EmptyInput => CliError::input_with_help(
                "a chart name is required",
                "Pass a chart such as 'bitnami/redis', or run interactively to be prompted",
            ),
            ResolveError::NoChartsFound { query } => CliError::NoCharts {
                query,
                help: Some(
                    "Add the chart's repository with 'helm repo add <name> <url>' and run 'helm repo update'"
                        .to_string(),
                ),
            },
            ResolveError::RepositoryUrlNotFound { repo } => CliError::Repository {
                message: format!("no URL configured for repository '{}'", repo),
                help: Some("Run 'helm repo list' to check the configured repositories".to_string()),
            },
            ResolveError::CommandExecution(e) => CliError::Command {
                message: e.to_string(),
                help: Some("Check that helm is installed, or point --helm at the binary".to_string()),
            },
            ResolveError::Prompt { message } => CliError::Input {
                message,
                help: None,
            },
            ResolveError::Persist(e) => CliError::Io {
                message: e.to_string(),
            },
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chartwrap_helm::HelmError;

    #[test]
    fn test_exit_codes_by_cause() {
        let cases = [
            (ResolveError::EmptyInput, exit_codes::INPUT_ERROR),
            (
                ResolveError::NoChartsFound {
                    query: "nope".to_string(),
                },
                exit_codes::NO_CHARTS,
            ),
            (
                ResolveError::RepositoryUrlNotFound {
                    repo: "ghost".to_string(),
                },
                exit_codes::REPOSITORY_ERROR,
            ),
            (
                ResolveError::CommandExecution(HelmError::CommandFailed {
                    command: "helm search repo x".to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: "boom".to_string(),
                }),
                exit_codes::COMMAND_ERROR,
            ),
        ];

        for (err, code) in cases {
            assert_eq!(CliError::from(err).exit_code(), code);
        }
    }

    #[test]
    fn test_no_charts_message_names_query() {
        let err = CliError::from(ResolveError::NoChartsFound {
            query: "redis".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "No charts found for 'redis' in the configured repositories"
        );
    }
}

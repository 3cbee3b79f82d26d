//! `ChartTool` backed by the `helm` binary

use chartwrap_core::{ChartCandidate, RepositoryEntry};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{HelmError, Result};
use crate::parse::{parse_repo_list, parse_search_output};
use crate::tool::ChartTool;

/// Release name used for debug dry-runs
const PROBE_RELEASE: &str = "chartwrap-probe";

/// Runs `helm` as a blocking child process
///
/// Arguments are passed as a vector, never through a shell.
#[derive(Debug, Clone)]
pub struct HelmCli {
    binary: PathBuf,
}

impl HelmCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn display_command(&self, args: &[&str]) -> String {
        format!("{} {}", self.binary.display(), args.join(" "))
    }

    /// Run and return stdout; non-zero exit is an error carrying stderr
    fn run(&self, args: &[&str]) -> Result<String> {
        let command = self.display_command(args);
        tracing::debug!("Running {}", command);

        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|source| HelmError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(HelmError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: if stderr.is_empty() {
                    "Unknown error".to_string()
                } else {
                    stderr
                },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Like `run`, but stdout and stderr together; debug output goes to both
    fn run_combined(&self, args: &[&str]) -> Result<String> {
        let command = self.display_command(args);
        tracing::debug!("Running {}", command);

        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|source| HelmError::Spawn {
                command: command.clone(),
                source,
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push('\n');
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(HelmError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(text)
    }
}

fn scoped_args<'a>(base: &mut Vec<&'a str>, repo_url: Option<&'a str>, version: Option<&'a str>) {
    if let Some(url) = repo_url {
        base.extend(["--repo", url]);
    }
    if let Some(version) = version {
        base.extend(["--version", version]);
    }
}

impl ChartTool for HelmCli {
    fn version(&self) -> Result<String> {
        Ok(self.run(&["version", "--short"])?.trim().to_string())
    }

    fn search_repo(&self, query: &str) -> Result<Vec<ChartCandidate>> {
        let args = ["search", "repo", query, "--versions", "-o", "json"];
        let stdout = match self.run(&args) {
            Ok(stdout) => stdout,
            Err(e) if e.is_no_repositories() => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        parse_search_output(&stdout).map_err(|e| HelmError::InvalidOutput {
            command: self.display_command(&args),
            message: e.to_string(),
        })
    }

    fn repo_list(&self) -> Result<Vec<RepositoryEntry>> {
        let args = ["repo", "list", "-o", "json"];
        let stdout = match self.run(&args) {
            Ok(stdout) => stdout,
            Err(e) if e.is_no_repositories() => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        parse_repo_list(&stdout).map_err(|e| HelmError::InvalidOutput {
            command: self.display_command(&args),
            message: e.to_string(),
        })
    }

    fn repo_add(&self, name: &str, url: &str) -> Result<()> {
        self.run(&["repo", "add", name, url])?;
        Ok(())
    }

    fn repo_update(&self, name: &str) -> Result<()> {
        self.run(&["repo", "update", name])?;
        Ok(())
    }

    fn show_values(&self, chart: &str, repo_url: Option<&str>, version: Option<&str>) -> Result<String> {
        let mut args = vec!["show", "values", chart];
        scoped_args(&mut args, repo_url, version);
        self.run(&args)
    }

    fn template_debug(&self, chart: &str, repo_url: Option<&str>, version: Option<&str>) -> Result<String> {
        let mut args = vec!["template", PROBE_RELEASE, chart];
        scoped_args(&mut args, repo_url, version);
        args.extend(["--dry-run", "--debug"]);
        self.run_combined(&args)
    }

    fn pull_untar(
        &self,
        chart: &str,
        repo_url: Option<&str>,
        version: Option<&str>,
        dest: &Path,
    ) -> Result<()> {
        let dest = dest.to_string_lossy().into_owned();
        let mut args = vec!["pull", chart];
        scoped_args(&mut args, repo_url, version);
        args.extend(["--untar", "--untardir", dest.as_str()]);
        self.run(&args)?;
        Ok(())
    }
}

//! Resolve command - turn a typed chart name into name, version and repository URL
//!
//! Runs as the template's pre-generation hook. Every failure here is fatal
//! and aborts generation; on success the resolved chart is written to the
//! hand-off file for the materialize phase.

use chartwrap_core::{
    ChartReference, CoreError, HandoffState, group_and_cap, narrow_to_exact, normalize_field,
    select_candidate, update_template_context,
};
use chartwrap_helm::{ChartTool, HelmError};
use std::path::PathBuf;
use thiserror::Error;

use crate::display;
use crate::error::Result;
use crate::prompt::{PromptError, Prompter};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No chart name given")]
    EmptyInput,

    #[error("No charts found for '{query}'")]
    NoChartsFound { query: String },

    #[error("Repository URL not found for repository '{repo}'")]
    RepositoryUrlNotFound { repo: String },

    #[error(transparent)]
    CommandExecution(#[from] HelmError),

    #[error("{message}")]
    Prompt { message: String },

    #[error("Failed to persist resolved chart: {0}")]
    Persist(#[from] CoreError),
}

impl From<PromptError> for ResolveError {
    fn from(err: PromptError) -> Self {
        ResolveError::Prompt {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Chart identifier as rendered by the template
    pub chart: Option<String>,
    /// Template default that means "not chosen yet"
    pub placeholder: String,
    pub interactive: bool,
    pub max_versions: usize,
    pub handoff_file: PathBuf,
    pub context_file: Option<PathBuf>,
}

/// Run the resolve phase and persist its result
pub fn run<T: ChartTool + ?Sized, P: Prompter + ?Sized>(
    tool: &T,
    prompter: &mut P,
    options: &ResolveOptions,
) -> Result<()> {
    let reference = resolve(tool, prompter, options)?;
    persist(&reference, options)?;
    display::display_resolved(&reference);
    Ok(())
}

/// Resolve the chart without touching the filesystem
pub fn resolve<T: ChartTool + ?Sized, P: Prompter + ?Sized>(
    tool: &T,
    prompter: &mut P,
    options: &ResolveOptions,
) -> std::result::Result<ChartReference, ResolveError> {
    let query = chart_identifier(prompter, options)?;

    let version = tool.version()?;
    tracing::debug!("Using package manager {}", version);
    tracing::info!("Searching repositories for chart: {}", query);

    let mut found = tool.search_repo(&query)?;
    if found.is_empty() {
        found = offer_repository(tool, prompter, options, &query)?;
    }

    let candidates = group_and_cap(narrow_to_exact(&query, found), options.max_versions);

    let answer = if candidates.len() > 1 && options.interactive {
        display::display_candidates(&candidates);
        Some(prompter.input("Select a chart", Some("1"))?)
    } else {
        None
    };

    let chosen = select_candidate(&candidates, answer.as_deref())
        .ok_or_else(|| ResolveError::NoChartsFound {
            query: query.clone(),
        })?;

    let url = tool
        .repo_url(&chosen.repo_name)?
        .ok_or_else(|| ResolveError::RepositoryUrlNotFound {
            repo: chosen.repo_name.clone(),
        })?;

    Ok(ChartReference::new(chosen.full_name.clone())
        .with_version(chosen.version.clone())
        .with_repository_url(url))
}

/// Write the hand-off record and, if asked, the template context
pub fn persist(reference: &ChartReference, options: &ResolveOptions) -> std::result::Result<(), ResolveError> {
    let state = HandoffState::from_reference(reference);

    // Record goes last: a failed context update leaves no hand-off
    if let Some(context_file) = &options.context_file {
        update_template_context(context_file, &state)?;
        tracing::debug!("Updated template context {}", context_file.display());
    }

    state.write(&options.handoff_file)?;
    tracing::debug!("Wrote hand-off record to {}", options.handoff_file.display());
    Ok(())
}

fn chart_identifier<P: Prompter + ?Sized>(
    prompter: &mut P,
    options: &ResolveOptions,
) -> std::result::Result<String, ResolveError> {
    let given = normalize_field(options.chart.as_deref()).filter(|name| *name != options.placeholder);
    if let Some(name) = given {
        return Ok(name);
    }

    if !options.interactive {
        return Err(ResolveError::EmptyInput);
    }

    let typed = prompter.input("Chart name (e.g. bitnami/redis)", None)?;
    normalize_field(Some(&typed)).ok_or(ResolveError::EmptyInput)
}

/// Offer to register a repository when the search came back empty
fn offer_repository<T: ChartTool + ?Sized, P: Prompter + ?Sized>(
    tool: &T,
    prompter: &mut P,
    options: &ResolveOptions,
    query: &str,
) -> std::result::Result<Vec<chartwrap_core::ChartCandidate>, ResolveError> {
    let no_charts = || ResolveError::NoChartsFound {
        query: query.to_string(),
    };

    if !options.interactive {
        return Err(no_charts());
    }

    let prompt = format!("No charts found for '{}'. Add a chart repository?", query);
    if !prompter.confirm(&prompt, false)? {
        return Err(no_charts());
    }

    let name = prompter.input("Repository name", None)?;
    let url = prompter.input("Repository URL", None)?;
    let (Some(name), Some(url)) = (normalize_field(Some(&name)), normalize_field(Some(&url))) else {
        return Err(no_charts());
    };

    tool.repo_add(&name, &url)?;
    tool.repo_update(&name)?;
    tracing::info!("Added repository {} ({})", name, url);

    let found = tool.search_repo(query)?;
    if found.is_empty() {
        return Err(no_charts());
    }
    Ok(found)
}

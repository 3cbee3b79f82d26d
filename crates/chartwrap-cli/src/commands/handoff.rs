//! Handoff commands - inspect or clear the record passed between phases

use chartwrap_core::HandoffState;
use console::style;
use std::path::Path;

use crate::error::{CliError, Result};

/// Print the pending record as JSON without consuming it
pub fn show(path: &Path) -> Result<()> {
    let state = HandoffState::read(path)
        .map_err(|e| CliError::other(e.to_string()))?
        .ok_or_else(|| {
            CliError::input_with_help(
                format!("no hand-off record at {}", path.display()),
                "Run 'chartwrap resolve' first",
            )
        })?;

    let json = serde_json::to_string_pretty(&state).map_err(|e| CliError::other(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

/// Delete a leftover record
pub fn clear(path: &Path) -> Result<()> {
    let removed = HandoffState::remove(path).map_err(|e| CliError::other(e.to_string()))?;
    if removed {
        println!("{} Removed {}", style("✓").green().bold(), path.display());
    } else {
        println!("Nothing to remove at {}", path.display());
    }
    Ok(())
}

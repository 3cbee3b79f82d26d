//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.
//! A non-zero code from `resolve` aborts the template generation run.

/// Success - operation completed (materialize always ends here)
#[allow(dead_code)]
pub const SUCCESS: i32 = 0;

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Input error - no chart name or unusable operator input
pub const INPUT_ERROR: i32 = 2;

/// No charts matched the search
pub const NO_CHARTS: i32 = 3;

/// Repository error - chart found but its repository is not configured
pub const REPOSITORY_ERROR: i32 = 4;

/// IO error - hand-off or context file could not be read or written
pub const IO_ERROR: i32 = 5;

/// External command error - the package manager failed or is missing
pub const COMMAND_ERROR: i32 = 6;

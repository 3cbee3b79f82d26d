//! CLI commands

pub mod handoff;
pub mod materialize;
pub mod resolve;

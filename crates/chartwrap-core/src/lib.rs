//! chartwrap Core - types shared by the chart resolver and materializer
//!
//! This crate provides the foundational types used throughout chartwrap:
//! - `ChartReference`: the resolved (name, version, repository URL) triple
//! - `ChartCandidate` / `RepositoryEntry`: rows reported by the package manager
//! - `Values`: the ordered values document with chart-scoped merge
//! - `ChartMetadata`: the generated `Chart.yaml` and its patch rules
//! - `HandoffState`: the record passed from the resolve phase to the materialize phase

pub mod chart;
pub mod defaults;
pub mod error;
pub mod handoff;
pub mod reference;
pub mod selection;
pub mod values;
pub mod version;

pub use chart::ChartMetadata;
pub use error::{CoreError, Result};
pub use handoff::{HandoffState, update_template_context};
pub use reference::{ChartCandidate, ChartReference, RepositoryEntry, normalize_field};
pub use selection::{group_and_cap, narrow_to_exact, select_candidate};
pub use values::Values;
pub use version::{compare_versions, parse_lenient};

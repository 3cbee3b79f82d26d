//! chartwrap Helm integration
//!
//! This crate talks to the `helm` binary on behalf of both hook phases:
//!
//! - **`ChartTool`**: the operations chartwrap needs from a chart package
//!   manager, as a trait so workflows can be exercised without a real binary
//! - **`HelmCli`**: the subprocess implementation of `ChartTool`
//! - **`fetch_values`**: the ordered chain of strategies used to obtain an
//!   upstream chart's default values
//!
//! ## Example
//!
//! ```rust,no_run
//! use chartwrap_core::ChartReference;
//! use chartwrap_helm::{ChartTool, HelmCli, fetch_values};
//!
//! let helm = HelmCli::new("helm");
//! let candidates = helm.search_repo("redis")?;
//!
//! let reference = ChartReference::new("bitnami/redis").with_version("18.1.0");
//! let outcome = fetch_values(&helm, &reference);
//! println!("{} top-level keys", outcome.values.len());
//! # Ok::<(), chartwrap_helm::HelmError>(())
//! ```

pub mod cli;
pub mod error;
pub mod fetch;
pub mod parse;
pub mod tool;
pub mod well_known;

pub use cli::HelmCli;
pub use error::{HelmError, Result};
pub use fetch::{CHAIN, FetchOutcome, ValuesSource, ValuesStrategy, fetch_values};
pub use tool::ChartTool;

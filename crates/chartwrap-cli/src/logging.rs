//! Diagnostic logging setup
//!
//! Library crates emit `tracing` events; the binary prints them to stderr.
//! `RUST_LOG` wins when set, otherwise only warnings show (debug with `--debug`).

use tracing_subscriber::EnvFilter;

pub fn init(debug: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .without_time()
        .try_init();
}

//! Log subscriber setup
//!
//! Logs go to stderr so stdout carries only the display.

use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Filter from `RUST_LOG`, falling back to the verbosity level
#[must_use]
pub fn build_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()))
}

/// Installs the global fmt subscriber. A second call is a no-op.
pub fn init(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

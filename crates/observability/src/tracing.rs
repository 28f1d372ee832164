//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Default filter: our crates at info, everything else at warn.
const DEFAULT_FILTER: &str = "warn,stockdesk=info";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops). `RUST_LOG`
/// overrides the default filter. Output is compact human-readable text —
/// this is an interactive client, not a log-shipping server.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(true)
        .try_init();
}

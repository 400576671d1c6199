//! Tracing/logging initialization.
//!
//! JSON logs everywhere except the `local` environment, which gets
//! human-readable output.

use hrs_core::SecurityConfig;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Initialize tracing/logging for the process.
///
/// The filter comes from `RUST_LOG`. Safe to call multiple times (subsequent
/// calls are no-ops).
pub fn init(config: &SecurityConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = if config.is_local() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .with_target(false)
            .try_init()
    };

    if installed.is_ok() {
        ::tracing::info!(environment = %config.environment, "tracing initialized");
    }
}

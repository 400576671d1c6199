//! Tracing and logging (shared setup).

use hrs_core::SecurityConfig;

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(config: &SecurityConfig) {
    tracing::init(config);
}

/// Tracing configuration (filters, layers).
pub mod tracing;

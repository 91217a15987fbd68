// src/logging.rs

use tracing_subscriber::{fmt, EnvFilter};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialise plain-text logging. The level comes from `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_line_number(true)
        .try_init();
}

/// Initialise JSON logging, one object per line.
pub fn init_json() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .json()
        .with_timer(fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// Verbose logging routed through the test harness writer.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

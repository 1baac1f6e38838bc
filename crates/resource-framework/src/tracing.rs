//! # Tracing Setup
//!
//! Structured logging for everything built on this framework.

use tracing_subscriber::EnvFilter;

/// Initializes the tracing/logging infrastructure for the application.
///
/// - **Environment-based filtering**: controlled via `RUST_LOG`, `warn` when unset
/// - **stderr output**: stdout stays reserved for rendered resources
///
/// Calling it more than once is harmless; later calls keep the first subscriber.
///
/// # Environment Variables
///
/// - `RUST_LOG=info` - one line per dispatch and per aggregated collection
/// - `RUST_LOG=debug` - every page request and route match
/// - `RUST_LOG=resource_framework=debug` - debug only for the framework
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

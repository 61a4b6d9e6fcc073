//! Tracing initialization for engine hosts.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Filter comes from `HARMLENS_LOG` (fallback `RUST_LOG`), defaulting to
/// `info`. Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = std::env::var("HARMLENS_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .try_init();
}

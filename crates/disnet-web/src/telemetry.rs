//! Tracing setup shared by the server and CLI binaries.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. RUST_LOG wins over `default_filter`.
pub fn init(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

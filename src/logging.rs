//! Logging initialisation for the `lane-ingest` binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is left to the binary.

use tracing_subscriber::EnvFilter;

/// Log level used when neither `RUST_LOG` nor a configured level is usable.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Build the filter. Priority: `RUST_LOG` > `level` > [`DEFAULT_LOG_LEVEL`].
pub fn env_filter(level: Option<&str>) -> EnvFilter {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return EnvFilter::from_default_env();
    }
    level
        .and_then(|l| EnvFilter::try_new(l).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Install the global `tracing` subscriber, writing compact lines to stderr.
pub fn init(level: Option<&str>) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialised");
}

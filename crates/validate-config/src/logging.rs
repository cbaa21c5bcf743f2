//! Log setup for the command-line tool.

use std::io;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Used when `RUST_LOG` is unset. Covers every crate, so warnings from the
/// validation libraries (a notifier that failed, say) are shown too.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Filter from `RUST_LOG`, or [`DEFAULT_LOG_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber. Logs go to stderr so reports on stdout
/// stay machine-readable.
pub fn init() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

//! Tracing subscriber setup for the `bookchat` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the application.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter variable, same syntax as `RUST_LOG`.
pub const ENV_LOG: &str = "BOOKCHAT_LOG";

pub const DEFAULT_FILTER: &str = "bookchat=info";

/// Build the filter from `BOOKCHAT_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    filter_from(std::env::var(ENV_LOG).ok().as_deref())
}

fn filter_from(value: Option<&str>) -> EnvFilter {
    value
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber, writing to stderr so stdout carries only
/// answers.
///
/// Returns false if a subscriber was already installed.
pub fn init_tracing() -> bool {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .is_ok()
}

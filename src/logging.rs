//! Logging setup
//!
//! Installs the global `tracing` subscriber from [`LoggingConfig`].
//! `RUST_LOG`, when set, wins over the configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Build the filter for `config`, honouring `RUST_LOG`
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("careerhub={}", config.level)))
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init(config: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    let result = if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if result.is_ok() {
        tracing::debug!(level = %config.level, format = %config.format, "Logging initialized");
    }
}

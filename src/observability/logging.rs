//! Structured logging setup.
//!
//! Uses `tracing` with an `EnvFilter`; `RUST_LOG` overrides the configured
//! level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Install a global fmt subscriber.
///
/// Returns `false` if a global subscriber was already set.
pub fn init_logging(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(&config.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(format!("chain_session={}", level))
        .unwrap_or_else(|_| EnvFilter::new("chain_session=info"))
}

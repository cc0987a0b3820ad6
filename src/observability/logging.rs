//! Structured logging.
//!
//! `RUST_LOG` wins when set; otherwise the configured log level applies.
//! Production emits JSON lines, every other environment the human format.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::GatewayConfig;

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(config: &GatewayConfig) -> EnvFilter {
    EnvFilter::try_new(format!("{},tower_http=info", config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global tracing subscriber.
pub fn init(config: &GatewayConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

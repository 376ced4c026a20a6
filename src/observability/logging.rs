//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Derive the default filter from the configured log level
//!
//! # Design Decisions
//! - RUST_LOG wins over the config file when set
//! - tower_http spans share the configured level so request traces and
//!   application logs stay in sync

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Install the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let default_filter = format!(
        "download_proxy={level},tower_http={level}",
        level = config.log_level
    );

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

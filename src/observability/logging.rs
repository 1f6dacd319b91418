//! Structured logging.
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - `RUST_LOG` wins when set; the configured level is the fallback

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// `log_level` seeds the default filter directives for the gateway and its
/// HTTP middleware when `RUST_LOG` is not set.
pub fn init(log_level: &str) {
    let default_filter = format!("honeygate={log_level},tower_http={log_level}");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

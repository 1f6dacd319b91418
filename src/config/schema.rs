//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files and
//! carry defaults so a minimal (or absent) config file works out of the box.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream dashboard API settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5320").
    pub bind_address: String,

    /// Inbound request timeout in seconds. Sized for a long aggregation run
    /// of many sequential upstream calls, not a single one.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5320".to_string(),
            request_timeout_secs: 300,
        }
    }
}

/// Upstream dashboard API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the dashboard API.
    pub base_url: String,

    /// Total request timeout in seconds.
    ///
    /// The reference behavior applies no timeout at all, which lets a hung
    /// upstream block a request indefinitely. This deviates deliberately.
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Maximum pages one aggregation run may fetch. Bounds the pagination
    /// loop against an upstream whose metadata never terminates it.
    pub max_pages: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dashboard.honeygain.com/api/v1".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_pages: 1000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

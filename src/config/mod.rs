//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → env overrides (PORT, HONEYGATE_UPSTREAM_URL)
//!     → semantic validation
//!     → GatewayConfig (validated, immutable)
//!     → shared via AppState with all handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults so the gateway runs with no config file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;

pub use loader::{from_env, load_config, ConfigError};
pub use schema::{GatewayConfig, ListenerConfig, ObservabilityConfig, UpstreamConfig};

//! honeygate: stateless REST gateway for the Honeygain dashboard API.
//!
//! Each local route forwards to a single upstream endpoint, flattening
//! paginated collections and normalizing fixed-format date fields before
//! the response goes back to the caller.

pub mod config;
pub mod http;
pub mod observability;
pub mod upstream;

pub use config::GatewayConfig;
pub use http::HttpServer;

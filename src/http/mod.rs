//! HTTP surface of the gateway.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → server.rs (axum setup, middleware: trace, timeout, request ID)
//!     → auth.rs (bearer token extraction, relayed verbatim)
//!     → handlers.rs (one handler per local route → upstream call(s))
//!     → error.rs (upstream failures → relayed status or 502)
//!     → serialized response
//! ```

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use auth::BearerToken;
pub use error::ApiError;
pub use server::{AppState, HttpServer};

//! Dashboard upstream subsystem.
//!
//! # Data Flow
//! ```text
//! route handler
//!     → client.rs (one signed HTTP call, envelope decode)
//!     → [pagination.rs drives repeated calls for list endpoints]
//!     → normalize.rs (fixed-format date fields → canonical values)
//!     → handler serializes the result for the caller
//! ```
//!
//! # Design Decisions
//! - Everything here is stateless and constructed per process, not per
//!   request; only the reqwest connection pool is shared
//! - Errors carry enough structure for the http layer to relay upstream
//!   failures verbatim and map local ones to 502

pub mod client;
pub mod envelope;
pub mod error;
pub mod normalize;
pub mod pagination;

pub use client::UpstreamClient;
pub use envelope::{Envelope, Pagination};
pub use error::{UpstreamError, UpstreamResult};
pub use normalize::DateFormat;

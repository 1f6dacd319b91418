//! Upstream error taxonomy.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to the dashboard upstream.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream unreachable, connection reset, or request timed out.
    #[error("upstream request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status. The status and raw body
    /// are relayed to the caller as-is.
    #[error("upstream returned {status}")]
    Status { status: StatusCode, body: Vec<u8> },

    /// Upstream answered 2xx but the body was not a decodable envelope.
    #[error("upstream envelope could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    /// A date/time field was present but did not match its fixed format.
    #[error("malformed date in field '{field}': '{value}'")]
    MalformedDate { field: String, value: String },

    /// Pagination never terminated within the configured page cap.
    #[error("aggregation exceeded the page limit of {limit}")]
    PageLimit { limit: u32 },
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

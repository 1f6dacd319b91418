//! Mapping upstream failures onto local HTTP responses.
//!
//! # Design Decisions
//! - A non-2xx upstream answer is relayed verbatim: same status, same body
//! - Everything the gateway itself detects (network failure, undecodable
//!   envelope, malformed date, page cap) is a 502 with a JSON error body,
//!   since the fault sits on the upstream side of this process

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::upstream::UpstreamError;

/// Error returned by route handlers.
#[derive(Debug)]
pub struct ApiError(pub UpstreamError);

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            UpstreamError::Status { status, body } => {
                tracing::warn!(status = %status, "Relaying upstream error response");
                (status, body).into_response()
            }
            UpstreamError::Network(e) => {
                tracing::error!(error = %e, "Upstream unreachable");
                error_body(StatusCode::BAD_GATEWAY, "upstream unreachable")
            }
            UpstreamError::Decode(e) => {
                tracing::error!(error = %e, "Upstream envelope could not be decoded");
                error_body(StatusCode::BAD_GATEWAY, "malformed upstream response")
            }
            UpstreamError::MalformedDate { ref field, ref value } => {
                tracing::error!(field = %field, value = %value, "Upstream date field did not match its format");
                error_body(StatusCode::BAD_GATEWAY, "malformed upstream date field")
            }
            UpstreamError::PageLimit { limit } => {
                tracing::error!(limit, "Aggregation exceeded the page cap");
                error_body(StatusCode::BAD_GATEWAY, "upstream pagination never terminated")
            }
        }
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

//! Bearer token extraction.
//!
//! The gateway never validates credentials itself: whatever the caller put
//! after `Bearer ` is relayed verbatim to the upstream, and a missing or
//! malformed header yields an empty token that the upstream's own auth
//! rejects. Local 401s would mask the upstream's error contract.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

/// The inbound bearer token, possibly empty.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Infallible> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.split("Bearer ").last())
            .unwrap_or("")
            .to_string();
        Ok(BearerToken(token))
    }
}

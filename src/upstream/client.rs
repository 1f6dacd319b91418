//! Upstream HTTP client.
//!
//! # Responsibilities
//! - Issue one signed call per invocation against the dashboard API
//! - Decode the `{ data, meta }` envelope on JSON endpoints
//! - Relay raw status codes on fire-and-forget endpoints
//! - Enforce the configured request and connect timeouts
//!
//! # Design Decisions
//! - The bearer token is relayed verbatim, even when empty; the upstream's
//!   own auth failure comes back to the caller untouched
//! - Non-2xx responses are never interpreted locally: status and body bytes
//!   are surfaced as-is
//! - No client-side retry; every call is single-shot

use std::time::Duration;

use axum::http::StatusCode;
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::upstream::envelope::Envelope;
use crate::upstream::error::{UpstreamError, UpstreamResult};

/// Stateless client for the dashboard upstream.
///
/// Cheap to clone; the inner `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    /// Build a client from the upstream configuration.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        tracing::info!(base_url = %base_url, timeout_secs = config.timeout_secs, "Upstream client initialized");

        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GET a resource and decode its envelope.
    ///
    /// `query` pairs are appended to the request URL; the token is attached
    /// as a bearer credential.
    pub async fn get_envelope(
        &self,
        path: &str,
        query: &[(&str, String)],
        token: &str,
    ) -> UpstreamResult<Envelope> {
        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// GET a resource and return the envelope's `data` payload.
    pub async fn get_data(&self, path: &str, token: &str) -> UpstreamResult<Value> {
        Ok(self.get_envelope(path, &[], token).await?.data)
    }

    /// POST an unauthenticated JSON body and return the envelope's `data`
    /// payload. Used by account creation and token issuance.
    pub async fn post_data<B: Serialize>(&self, path: &str, body: &B) -> UpstreamResult<Value> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Ok(Self::decode(response).await?.data)
    }

    /// Issue an authenticated request and relay the upstream status code
    /// verbatim, discarding the response body.
    pub async fn send_status<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        token: &str,
        body: Option<&B>,
    ) -> UpstreamResult<StatusCode> {
        let mut request = self
            .http
            .request(method, self.url(path))
            .header(AUTHORIZATION, format!("Bearer {token}"));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Ok(response.status())
    }

    async fn decode(response: reqwest::Response) -> UpstreamResult<Envelope> {
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status,
                body: bytes.to_vec(),
            });
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

//! Shared utilities for integration testing.
//!
//! Spawns a programmable mock upstream (plain axum app) that records every
//! request it sees and answers from a caller-supplied responder, plus a
//! helper that boots the gateway itself on an ephemeral port.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use honeygate::config::GatewayConfig;
use honeygate::HttpServer;

/// One request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: String,
}

impl Recorded {
    /// First value of a query parameter, if present.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

type Responder = Arc<dyn Fn(&Recorded) -> (StatusCode, String) + Send + Sync>;

#[derive(Clone)]
struct MockState {
    respond: Responder,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// Handle to a running mock upstream.
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Snapshot of every recorded request, in arrival order.
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests whose path matches exactly.
    pub fn calls_to(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }
}

/// Start a mock upstream answering every request through `respond`.
pub async fn start_mock_upstream<F>(respond: F) -> MockUpstream
where
    F: Fn(&Recorded) -> (StatusCode, String) + Send + Sync + 'static,
{
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        respond: Arc::new(respond),
        requests: requests.clone(),
    };

    let app = Router::new().fallback(record_and_respond).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream { addr, requests }
}

async fn record_and_respond(
    State(state): State<MockState>,
    request: Request<Body>,
) -> impl IntoResponse {
    let method = request.method().to_string();
    let path = request
        .uri()
        .path()
        .trim_start_matches('/')
        .to_string();
    let query = request
        .uri()
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default();
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        // Trailing whitespace is OWS-trimmed in transit, so an empty token
        // arrives as a bare "Bearer".
        .and_then(|h| h.strip_prefix("Bearer"))
        .map(|rest| rest.trim_start().to_string());

    let body_bytes = axum::body::to_bytes(request.into_body(), 1024 * 1024)
        .await
        .unwrap_or_default();
    let recorded = Recorded {
        method,
        path,
        query,
        bearer,
        body: String::from_utf8_lossy(&body_bytes).into_owned(),
    };

    state.requests.lock().unwrap().push(recorded.clone());
    let (status, body) = (state.respond)(&recorded);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

/// Envelope for a detail endpoint: `{ data }`.
pub fn data_envelope(data: Value) -> String {
    json!({ "data": data }).to_string()
}

/// Envelope for one page of a list endpoint: `{ data, meta.pagination }`.
pub fn page_envelope(items: Vec<Value>, current_page: u32, total_pages: u32) -> String {
    json!({
        "data": items,
        "meta": { "pagination": { "current_page": current_page, "total_pages": total_pages } }
    })
    .to_string()
}

/// Boot the gateway against the given upstream and return its base URL.
pub async fn start_gateway(upstream_base_url: String) -> String {
    start_gateway_with(upstream_base_url, |_| {}).await
}

/// Boot the gateway with extra configuration tweaks applied first.
pub async fn start_gateway_with<F>(upstream_base_url: String, tweak: F) -> String
where
    F: FnOnce(&mut GatewayConfig),
{
    let mut config = GatewayConfig::default();
    config.upstream.base_url = upstream_base_url;
    tweak(&mut config);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();
    tokio::spawn(async move {
        server.run(listener).await.unwrap();
    });

    format!("http://{}", addr)
}

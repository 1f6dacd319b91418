//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the axum Router with all gateway routes
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind the server to a listener and serve until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, patch, post, put};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::http::handlers;
use crate::upstream::{UpstreamClient, UpstreamResult};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: UpstreamClient,
    pub config: Arc<GatewayConfig>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> UpstreamResult<Self> {
        let client = UpstreamClient::new(&config.upstream)?;
        let request_timeout = Duration::from_secs(config.listener.request_timeout_secs);

        let state = AppState {
            client,
            config: Arc::new(config),
        };

        let router = Self::build_router(state, request_timeout);
        Ok(Self { router })
    }

    /// Build the axum router with all routes and middleware layers.
    fn build_router(state: AppState, request_timeout: Duration) -> Router {
        Router::new()
            .route("/auth/register", post(handlers::register))
            .route("/auth/token", post(handlers::issue_token))
            .route("/users/me", get(handlers::about_me))
            .route("/users/tos", get(handlers::tos_status))
            .route("/users/balances", get(handlers::balances))
            .route("/users/password", put(handlers::change_password))
            .route("/stats/traffic", get(handlers::traffic_stats))
            .route("/devices", get(handlers::list_devices))
            .route("/devices/{id}/title", put(handlers::rename_device))
            .route("/devices/{id}/restore", patch(handlers::restore_device))
            .route("/devices/{id}", delete(handlers::delete_device))
            .route("/referrals", get(handlers::list_referrals))
            .route("/transactions", get(handlers::list_transactions))
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}

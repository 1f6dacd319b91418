//! honeygate binary entry point.
//!
//! Startup sequence: resolve configuration from the environment, install the
//! tracing subscriber, bind the TCP listener, serve until Ctrl+C.

use tokio::net::TcpListener;

use honeygate::config;
use honeygate::observability::logging;
use honeygate::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::from_env()?;
    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        max_pages = config.upstream.max_pages,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

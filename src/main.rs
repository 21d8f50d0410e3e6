//! # Main Entry Point
//!
//! Wires the pieces together:
//! - Config: `PORT` / `AMASS_BIN` from the environment
//! - Adapter: bounded subprocess execution of the amass binary
//! - Server: one MCP tool over the streamable HTTP transport at /mcp

mod amass;
mod config;
mod server;

use anyhow::{Context, Result};
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};

use crate::config::ServerConfig;
use crate::server::AmassServer;

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,hyper=warn,tower=warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = ServerConfig::from_env();

    let handler_config = config.clone();
    let service = StreamableHttpService::new(
        move || Ok(AmassServer::new(&handler_config)),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let app = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;

    tracing::info!("amass-mcp listening on 0.0.0.0:{}/mcp", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

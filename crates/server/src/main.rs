//! pexwall server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use pexwall_core::AppConfig;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod state;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    if let Err(e) = config.require_pexels_api_key() {
        tracing::warn!(error = %e, "video tools need an api_key parameter");
    }

    tracing::info!(
        pexels = %config.pexels_base_url,
        wallpapers = %config.wallpaper_base_url,
        "Starting pexwall server on stdio transport"
    );

    let state = Arc::new(state::WidgetState::new(config)?);
    let handler = handler::PexwallServer::new(state);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}

//! Botads webhook service
//!
//! Reference HTTP service that receives Botads webhooks and issues short codes

use anyhow::{Context, Result};
use botads::config::Settings;
use botads::services::{AsyncBotadsClient, ClientConfig};
use botads::utils::logging::init_logging;
use botads::create_router;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new().context("Failed to load server settings")?;

    init_logging(&settings.logging)?;
    info!("{}", botads::version_info());

    let client = Arc::new(
        AsyncBotadsClient::new(ClientConfig::from_settings(&settings.botads))
            .context("Failed to create Botads client")?,
    );

    let app = create_router(settings.clone(), client.clone())?;

    let addr = settings.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 Botads webhook service started!");
    info!("📝 Health check: http://{}/health", addr);
    info!("🔔 Webhook endpoint: http://{}/webhook", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    match Arc::try_unwrap(client) {
        Ok(client) => client.close().await,
        Err(_) => warn!("Botads client still in use at shutdown, dropping it"),
    }

    info!("Botads webhook service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

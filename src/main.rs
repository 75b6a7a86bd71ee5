//! foundry-waitlist server entry point.
//!
//! Starts the Axum HTTP server with the waitlist REST endpoints.

use std::time::Duration;

use anyhow::Context;

use foundry_waitlist::api;
use foundry_waitlist::app_state::AppState;
use foundry_waitlist::config::WaitlistConfig;
use foundry_waitlist::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = WaitlistConfig::from_env()?;

    // Initialize tracing
    telemetry::init(config.log_format);
    tracing::info!(addr = %config.listen_addr, "starting foundry-waitlist");

    // Build store and service
    let app_state = AppState::from_config(&config)
        .await
        .context("failed to initialize waitlist store")?;

    // Build router
    let app = api::build_app(app_state, Duration::from_secs(config.request_timeout_secs));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

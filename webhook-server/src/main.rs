//! Webhook Server - GitHub webhook receiver that triggers the optimization
//! script.
//!
//! This binary provides a small web server that:
//! - Receives GitHub push webhooks
//! - Verifies the HMAC payload signature (if a secret is configured)
//! - Runs the optimization script and waits for it to finish
//! - Reports the outcome back to GitHub

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hookserver::web::{is_secret_configured, router, AppState};
use hookserver::{Config, ScriptRunner};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("webhook_server_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        signature_verification_enabled = is_secret_configured(&config.github_webhook_secret),
        script_command = %config.script_command,
        script_path = %config.script_path,
        "config_loaded"
    );

    // Create the script runner
    let runner = Arc::new(ScriptRunner::new(
        config.script_command.clone(),
        config.script_path.clone(),
    ));

    // Create application state and router
    let port = config.port;
    let state = AppState::new(config, runner);
    let app = router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "webhook_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("webhook_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("webhook_server_shutting_down");
}

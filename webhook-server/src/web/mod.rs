//! Web server module for handling the inbound webhook.
//!
//! This module provides the HTTP surface of the service:
//! - Receives GitHub push webhooks on `/api/webhook`
//! - Verifies the HMAC signature over the raw body
//! - Triggers the optimization script and waits for it
//! - Exposes `/health` for liveness probes

pub mod handlers;
pub mod signature;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{github_webhook, health, AppState, HealthResponse, WebhookResponse};
pub use signature::{is_secret_configured, verify_webhook_signature};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/webhook", post(github_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Webhook endpoint handlers.
//!
//! The webhook handler is a single linear pass:
//! 1. Verify the HMAC signature over the raw body
//! 2. Check the payload for a `ref` field (push event marker)
//! 3. Run the optimization script and wait for it to finish
//!
//! Nothing is stored between requests; each invocation opens, completes,
//! and discards its own resources.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::task::TaskRunner;
use crate::web::signature::verify_webhook_signature;
use crate::Config;

/// Header GitHub uses to deliver the payload signature.
const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub runner: Arc<dyn TaskRunner>,
}

impl AppState {
    pub fn new(config: Config, runner: Arc<dyn TaskRunner>) -> Self {
        Self {
            config: Arc::new(config),
            runner,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// GitHub Webhook
// =============================================================================

/// Webhook response body.
#[derive(Serialize)]
pub struct WebhookResponse {
    pub message: String,
}

impl WebhookResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// GitHub webhook endpoint.
///
/// Listens for push events and triggers the optimization script. The
/// script's own exit code is logged but never changes the HTTP status:
/// once the process launches, the response is 200. Only a failure to
/// start the process at all produces a 500.
pub async fn github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    info!(
        body_length = body.len(),
        has_signature = !signature.is_empty(),
        "webhook_received"
    );

    if !verify_webhook_signature(
        state.config.github_webhook_secret.as_deref(),
        &body,
        signature,
    ) {
        warn!("webhook_signature_invalid");
        return (
            StatusCode::FORBIDDEN,
            WebhookResponse::new("Invalid signature"),
        );
    }

    // A push event carries a `ref` field with the updated branch reference.
    // Anything else (other event types, non-JSON bodies) is rejected.
    let payload: Option<Value> = serde_json::from_slice(&body).ok();
    let git_ref = payload
        .as_ref()
        .and_then(|p| p.get("ref"))
        .and_then(Value::as_str);

    let git_ref = match git_ref {
        Some(r) => r,
        None => {
            warn!("webhook_not_a_push_event");
            return (
                StatusCode::BAD_REQUEST,
                WebhookResponse::new("Invalid webhook event"),
            );
        }
    };

    info!(git_ref = %git_ref, "change_detected_triggering_script");

    match state.runner.run().await {
        Ok(output) => {
            info!(
                success = output.success,
                stdout = %output.stdout.trim(),
                stderr = %output.stderr.trim(),
                "script_completed"
            );
            (
                StatusCode::OK,
                WebhookResponse::new("Optimization script triggered successfully"),
            )
        }
        Err(e) => {
            error!(error = %e, "script_launch_failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                WebhookResponse::new(format!("Error executing script: {}", e)),
            )
        }
    }
}

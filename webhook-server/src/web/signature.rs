//! GitHub webhook signature verification.
//!
//! GitHub signs webhook deliveries using HMAC-SHA256 over the raw request
//! body and sends the result in the `X-Hub-Signature-256` header as
//! `sha256=<hex digest>`.
//! Reference: https://docs.github.com/en/webhooks/using-webhooks/validating-webhook-deliveries

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Verify a GitHub webhook signature.
///
/// # Fail-open policy
///
/// If no secret is configured (`None` or blank), verification is SKIPPED and
/// every request is accepted. This mirrors the deployment default where the
/// webhook secret is optional, and it is a deliberate security trade-off:
/// running without a secret means anyone who knows the URL can trigger the
/// script. Set `GITHUB_WEBHOOK_SECRET` in production.
///
/// # Arguments
///
/// * `secret` - The configured shared secret, if any
/// * `body` - The raw request body bytes, exactly as received
/// * `provided` - The full `X-Hub-Signature-256` header value,
///   e.g. `sha256=5d61605c...`
///
/// # Returns
///
/// `true` if no secret is configured, or if the signature matches.
pub fn verify_webhook_signature(secret: Option<&str>, body: &[u8], provided: &str) -> bool {
    let secret = match secret {
        Some(s) if !s.trim().is_empty() => s,
        _ => {
            warn!("signature_verification_skipped_no_secret");
            return true;
        }
    };

    // HMAC-SHA256 accepts keys of any length, so this cannot fail for a
    // non-empty secret, but we stay on the false path rather than panic.
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            warn!("signature_invalid_key");
            return false;
        }
    };

    mac.update(body);

    let expected = format!("sha256={}", hex::encode(mac.finalize().into_bytes()));

    // Constant-time comparison to prevent timing attacks. Empty or truncated
    // header values fall out as a length mismatch.
    let valid = constant_time_compare(&expected, provided);

    if !valid {
        warn!(
            expected_length = expected.len(),
            actual_length = provided.len(),
            "signature_mismatch"
        );
    }

    valid
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

/// Check whether a usable webhook secret is configured.
pub fn is_secret_configured(secret: &Option<String>) -> bool {
    secret
        .as_ref()
        .map(|s| !s.trim().is_empty())
        .unwrap_or(false)
}

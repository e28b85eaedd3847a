//! HMAC-SHA256 webhook signatures
//!
//! The service signs the raw request body with the shared secret and sends the
//! hex-encoded digest in a header. Verification decodes the hex and compares
//! digests in constant time.

use crate::models::WebhookPayload;
use crate::utils::error::{BotadsError, BotadsResult};
use crate::webhook::payload::parse_webhook_payload;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Optional scheme prefix some senders put in front of the digest
const SIGNATURE_PREFIX: &str = "sha256=";

/// Key a MAC with the shared secret. An empty secret is a configuration error.
fn keyed_mac(secret: &str) -> BotadsResult<HmacSha256> {
    if secret.is_empty() {
        return Err(BotadsError::config("Webhook shared secret cannot be empty"));
    }
    HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| BotadsError::config(format!("Invalid webhook secret: {}", e)))
}

/// Sign a payload with HMAC-SHA256 and return the lowercase hex signature
pub fn sign_payload(body: &[u8], secret: &str) -> BotadsResult<String> {
    let mut mac = keyed_mac(secret)?;
    mac.update(body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verify an HMAC-SHA256 signature against a raw body.
///
/// Returns false for an empty body, an empty secret, a signature that is not
/// valid hex, or a mismatch. Never panics on attacker-controlled input.
pub fn verify_signature(body: &[u8], signature: &str, secret: &str) -> bool {
    if body.is_empty() {
        return false;
    }

    let signature = signature.trim();
    let signature = signature.strip_prefix(SIGNATURE_PREFIX).unwrap_or(signature);
    if signature.is_empty() {
        return false;
    }

    let expected = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let Ok(mut mac) = keyed_mac(secret) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Verifier bound to one shared secret
#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    secret: SecretString,
}

impl WebhookVerifier {
    /// Create a verifier, rejecting a missing secret up front
    pub fn new(secret: impl Into<String>) -> BotadsResult<Self> {
        Self::from_secret(SecretString::new(secret.into().into()))
    }

    /// Create a verifier from a secret already held by the settings
    pub fn from_secret(secret: SecretString) -> BotadsResult<Self> {
        keyed_mac(secret.expose_secret())?;
        Ok(Self { secret })
    }

    /// Check a body against its signature header value
    pub fn verify(&self, body: &[u8], signature: &str) -> bool {
        verify_signature(body, signature, self.secret.expose_secret())
    }

    /// Sign a body with this verifier's secret
    pub fn sign(&self, body: &[u8]) -> BotadsResult<String> {
        sign_payload(body, self.secret.expose_secret())
    }

    /// Verify, then decode. The body is never decoded when the signature fails.
    pub fn verify_and_parse(&self, body: &[u8], signature: &str) -> BotadsResult<WebhookPayload> {
        if !self.verify(body, signature) {
            debug!("Webhook signature mismatch ({} byte body)", body.len());
            return Err(BotadsError::InvalidSignature);
        }
        parse_webhook_payload(body)
    }
}

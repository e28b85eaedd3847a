//! Webhook module
//!
//! Authenticates and decodes notifications sent by Botads.
//!
//! Handling is strictly ordered: verify the raw body first, decode second.
//! [`WebhookVerifier::verify_and_parse`] performs both steps in that order.

pub mod payload;
pub mod signature;

pub use payload::parse_webhook_payload;
pub use signature::{sign_payload, verify_signature, WebhookVerifier};

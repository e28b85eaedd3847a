//! Data models module
//!
//! Defines the request/response structures of the Botads client API and webhook notifications

pub mod codes;
pub mod webhook;

pub use codes::{CodeRequest, CodeResponse};
pub use webhook::{WebhookEvent, WebhookPayload};

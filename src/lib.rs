//! Botads SDK
//!
//! Client for the Botads client API: issue single-use short codes for users
//! and authenticate the webhooks Botads sends back when an ad was watched or a
//! direct link was clicked.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;
pub mod webhook;

// Re-export common types
pub use config::Settings;
pub use handlers::{create_router, AppState};
pub use models::{CodeRequest, CodeResponse, WebhookEvent, WebhookPayload};
pub use services::{AsyncBotadsClient, BotadsClient, ClientConfig, CodeIssuer};
pub use utils::error::{ApiError, BotadsError, BotadsResult};
pub use webhook::{parse_webhook_payload, sign_payload, verify_signature, WebhookVerifier};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}

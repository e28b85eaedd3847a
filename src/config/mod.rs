//! Configuration management module
//!
//! Loads the webhook service configuration from environment variables and `.env` files

pub mod settings;

pub use settings::{BotadsConfig, LoggingConfig, ServerConfig, Settings, WebhookConfig};

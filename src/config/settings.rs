//! Application configuration settings
//!
//! Defines all configuration structures and loading logic for the webhook service

use crate::utils::logging::env_filter;
use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Default Botads API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.botads.app";

/// Default base URL that short codes are appended to
pub const DEFAULT_DIRECT_LINK_BASE_URL: &str = "https://botads.me/";

/// Default header carrying the webhook signature
pub const DEFAULT_SIGNATURE_HEADER: &str = "X-Signature";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Botads API configuration
    pub botads: BotadsConfig,
    /// Webhook configuration
    pub webhook: WebhookConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Maximum accepted request body in bytes
    pub max_body_size: usize,
}

/// Botads API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotadsConfig {
    /// API base URL
    pub base_url: String,
    /// Bearer token of the bot account
    #[serde(skip_serializing)]
    pub api_token: SecretString,
    /// Bot account identifier
    pub bot_id: i64,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Base URL for direct links built from issued codes
    pub direct_link_base_url: String,
}

/// Webhook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Shared secret used to verify webhook signatures
    #[serde(skip_serializing)]
    pub secret: SecretString,
    /// Header carrying the signature
    pub signature_header: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance from the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_token = lookup("BOTADS_API_TOKEN")
            .context("BOTADS_API_TOKEN environment variable not set")?;
        if api_token.is_empty() {
            anyhow::bail!("Botads API token cannot be empty");
        }
        if api_token.contains(char::is_whitespace) {
            anyhow::bail!("Botads API token cannot contain whitespace characters");
        }

        let secret = lookup("BOTADS_WEBHOOK_SECRET").unwrap_or_else(|| api_token.clone());
        if secret.is_empty() {
            anyhow::bail!("Webhook secret cannot be empty");
        }

        let settings = Self {
            server: ServerConfig {
                host: get_or_default("SERVER_HOST", "0.0.0.0"),
                port: get_or_default("SERVER_PORT", "8080")
                    .parse()
                    .context("Invalid port number")?,
                max_body_size: get_or_default("MAX_BODY_SIZE", "65536")
                    .parse()
                    .context("Invalid maximum body size")?,
            },
            botads: BotadsConfig {
                base_url: get_or_default("BOTADS_BASE_URL", DEFAULT_BASE_URL),
                bot_id: lookup("BOTADS_BOT_ID")
                    .context("BOTADS_BOT_ID environment variable not set")?
                    .parse()
                    .context("Invalid BOTADS_BOT_ID value")?,
                timeout: get_or_default("BOTADS_TIMEOUT", "10")
                    .parse()
                    .context("Invalid BOTADS_TIMEOUT value")?,
                direct_link_base_url: get_or_default(
                    "BOTADS_DIRECT_LINK_BASE_URL",
                    DEFAULT_DIRECT_LINK_BASE_URL,
                ),
                api_token: SecretString::new(api_token.into()),
            },
            webhook: WebhookConfig {
                secret: SecretString::new(secret.into()),
                signature_header: get_or_default("BOTADS_SIGNATURE_HEADER", DEFAULT_SIGNATURE_HEADER),
            },
            logging: LoggingConfig {
                level: get_or_default("RUST_LOG", "info"),
                format: get_or_default("LOG_FORMAT", "text"),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if self.server.max_body_size == 0 {
            anyhow::bail!("Maximum body size cannot be 0");
        }

        if !self.botads.base_url.starts_with("http") {
            anyhow::bail!("Invalid Botads base URL format, should start with 'http'");
        }

        if self.botads.timeout == 0 {
            anyhow::bail!("Timeout value cannot be 0");
        }

        if self.webhook.signature_header.trim().is_empty() {
            anyhow::bail!("Signature header name cannot be empty");
        }

        env_filter(&self.logging.level)?;

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Address the webhook service listens on
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

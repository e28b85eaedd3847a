//! Botads API client services
//!
//! Both client variants share the request building and response handling
//! defined here. They differ only in how the HTTP exchange is driven.

pub mod blocking;
pub mod client;

pub use blocking::BotadsClient;
pub use client::AsyncBotadsClient;

use crate::config::BotadsConfig;
use crate::models::CodeResponse;
use crate::utils::error::{ApiError, BotadsError, BotadsResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, warn};

/// Path of the code issuance endpoint
pub const CODES_PATH: &str = "/client/v1/codes";

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings shared by both client variants
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL without trailing slashes
    pub base_url: String,
    /// Bearer token of the bot account
    pub api_token: SecretString,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self::with_secret(base_url, SecretString::new(api_token.into().into()))
    }

    /// Build from a token that is already held as a secret
    pub fn with_secret(base_url: impl Into<String>, api_token: SecretString) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from the service's Botads settings
    pub fn from_settings(settings: &BotadsConfig) -> Self {
        Self::with_secret(settings.base_url.as_str(), settings.api_token.clone())
            .with_timeout(Duration::from_secs(settings.timeout))
    }

    /// Reject configurations that cannot produce a working client.
    ///
    /// The token itself is checked when the authorization header is built.
    pub fn validate(&self) -> BotadsResult<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(BotadsError::config(format!(
                "Base URL must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(BotadsError::config("Timeout cannot be zero"));
        }
        Ok(())
    }

    /// Full URL of the code issuance endpoint
    pub fn codes_url(&self) -> String {
        format!("{}{}", self.base_url, CODES_PATH)
    }

    /// Headers sent with every request
    pub(crate) fn default_headers(&self) -> BotadsResult<HeaderMap> {
        let token = self.api_token.expose_secret();
        if token.is_empty() {
            return Err(BotadsError::config("API token cannot be empty"));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| BotadsError::config("API token contains characters not allowed in a header"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

/// User agent sent by both clients
pub(crate) fn user_agent() -> String {
    format!("botads-rust/{}", crate::VERSION)
}

/// Turn a status and raw body into the call's outcome.
///
/// 200 decodes a [`CodeResponse`]; every other status becomes an [`ApiError`].
pub fn interpret_response(status: u16, body: &[u8]) -> BotadsResult<CodeResponse> {
    if status == 200 {
        Ok(serde_json::from_slice(body)?)
    } else {
        Err(ApiError::from_response(status, &String::from_utf8_lossy(body)).into())
    }
}

pub(crate) fn log_outcome(user_tg_id: &str, result: &BotadsResult<CodeResponse>) {
    match result {
        Ok(code) => debug!(
            "Code issued for user {} (expires in {}s)",
            user_tg_id, code.expires_in
        ),
        Err(BotadsError::Api(e)) => warn!(
            "Botads API rejected code request for user {}: {} {} - {}",
            user_tg_id, e.status_code, e.error_code, e.message
        ),
        Err(e) => warn!("Code request for user {} failed: {}", user_tg_id, e),
    }
}

/// Anything that can issue short codes asynchronously
#[async_trait]
pub trait CodeIssuer: Send + Sync {
    async fn create_code(&self, bot_id: i64, user_tg_id: &str) -> BotadsResult<CodeResponse>;
}

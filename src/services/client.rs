//! Asynchronous Botads client
//!
//! Encapsulates HTTP communication with the Botads client API

use crate::models::{CodeRequest, CodeResponse};
use crate::services::{interpret_response, log_outcome, user_agent, ClientConfig, CodeIssuer};
use crate::utils::error::BotadsResult;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Non-blocking Botads API client
///
/// Holds one connection pool for its lifetime. Calls share the pool and run
/// independently of each other; dropping a pending `create_code` future
/// aborts that request.
#[derive(Debug)]
pub struct AsyncBotadsClient {
    client: Client,
    config: ClientConfig,
}

impl AsyncBotadsClient {
    /// Create a new client instance
    pub fn new(config: ClientConfig) -> BotadsResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(config.default_headers()?)
            .user_agent(user_agent())
            .build()?;

        debug!("Created async Botads client for {}", config.base_url);
        Ok(Self { client, config })
    }

    /// Request a new short code for a user
    pub async fn create_code(&self, bot_id: i64, user_tg_id: &str) -> BotadsResult<CodeResponse> {
        debug!("Requesting code for bot {} user {}", bot_id, user_tg_id);

        let request = CodeRequest::new(bot_id, user_tg_id);
        let response = self
            .client
            .post(self.config.codes_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;

        let result = interpret_response(status, &body);
        log_outcome(user_tg_id, &result);
        result
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Shut the client down, releasing its connection pool
    pub async fn close(self) {
        debug!("Closing async Botads client for {}", self.config.base_url);
        drop(self.client);
    }
}

#[async_trait]
impl CodeIssuer for AsyncBotadsClient {
    async fn create_code(&self, bot_id: i64, user_tg_id: &str) -> BotadsResult<CodeResponse> {
        AsyncBotadsClient::create_code(self, bot_id, user_tg_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::BotadsError;

    #[test]
    fn test_client_creation() {
        let client = AsyncBotadsClient::new(ClientConfig::new("https://api.botads.app/", "token"));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().config().base_url, "https://api.botads.app");
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let client = AsyncBotadsClient::new(ClientConfig::new("https://api.botads.app", ""));
        assert!(matches!(client, Err(BotadsError::Config(_))));
    }

    #[test]
    fn test_debug_hides_token() {
        let client =
            AsyncBotadsClient::new(ClientConfig::new("https://api.botads.app", "very-secret-token"))
                .unwrap();
        assert!(!format!("{:?}", client).contains("very-secret-token"));
    }
}

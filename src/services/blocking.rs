//! Blocking Botads client
//!
//! Same contract as [`AsyncBotadsClient`](crate::services::AsyncBotadsClient),
//! driven by reqwest's blocking transport. Do not create or drop it inside an
//! async runtime.

use crate::models::{CodeRequest, CodeResponse};
use crate::services::{interpret_response, log_outcome, user_agent, ClientConfig};
use crate::utils::error::BotadsResult;
use reqwest::blocking::Client;
use tracing::debug;

/// Synchronous Botads API client
#[derive(Debug)]
pub struct BotadsClient {
    client: Client,
    config: ClientConfig,
}

impl BotadsClient {
    pub fn new(config: ClientConfig) -> BotadsResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(config.default_headers()?)
            .user_agent(user_agent())
            .build()?;

        debug!("Created blocking Botads client for {}", config.base_url);
        Ok(Self { client, config })
    }

    /// Request a new short code for a user, blocking the current thread
    pub fn create_code(&self, bot_id: i64, user_tg_id: &str) -> BotadsResult<CodeResponse> {
        debug!("Requesting code for bot {} user {}", bot_id, user_tg_id);

        let request = CodeRequest::new(bot_id, user_tg_id);
        let response = self.client.post(self.config.codes_url()).json(&request).send()?;

        let status = response.status().as_u16();
        let body = response.bytes()?;

        let result = interpret_response(status, &body);
        log_outcome(user_tg_id, &result);
        result
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Shut the client down, releasing its connection pool
    pub fn close(self) {
        debug!("Closing blocking Botads client for {}", self.config.base_url);
        drop(self.client);
    }
}

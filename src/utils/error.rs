//! Error handling module
//!
//! Defines the SDK error taxonomy and the structured API error built from
//! non-200 responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Sentinel error code used when the service does not supply one
pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN";

/// Default message used when the error object has no message
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Structured error returned by the Botads API for any non-200 response
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("Botads API error {status_code} ({error_code}): {message}")]
pub struct ApiError {
    /// HTTP status of the failed call
    pub status_code: u16,
    /// Service-defined symbolic code
    pub error_code: String,
    /// Human-readable message
    pub message: String,
    /// Extra payload, only when the service sends one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    /// Create an API error from its parts
    pub fn new(
        status_code: u16,
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: Option<Value>,
    ) -> Self {
        Self {
            status_code,
            error_code: error_code.into(),
            message: message.into(),
            details,
        }
    }

    /// Build the error from a raw non-200 response.
    ///
    /// A body that is not JSON yields `UNKNOWN` with the raw text as the
    /// message. A JSON body is searched for a nested `error` object; any
    /// missing field falls back to its default. This never fails.
    pub fn from_response(status_code: u16, body: &str) -> Self {
        let payload: Value = match serde_json::from_str(body) {
            Ok(payload) => payload,
            Err(_) => return Self::new(status_code, UNKNOWN_ERROR_CODE, body, None),
        };

        let error = payload.get("error");
        let field = |name: &str| error.and_then(|e| e.get(name));

        let error_code = field("code")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_ERROR_CODE);
        let message = field("message")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_ERROR_MESSAGE);
        let details = field("details").filter(|d| !d.is_null()).cloned();

        Self::new(status_code, error_code, message, details)
    }

    /// Whether the service rejected the call for rate limiting
    pub fn is_rate_limited(&self) -> bool {
        self.status_code == 429
    }

    /// Whether a later attempt may succeed (rate limits and server errors)
    pub fn is_retryable(&self) -> bool {
        self.is_rate_limited() || (500..600).contains(&self.status_code)
    }
}

/// SDK error types
#[derive(Error, Debug)]
pub enum BotadsError {
    /// Connection, DNS, TLS or timeout failure from the HTTP transport
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Well-formed non-200 response from the service
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Malformed success response or webhook body
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Webhook signature did not match the body
    #[error("Webhook signature verification failed")]
    InvalidSignature,

    /// Invalid client or verifier configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error response body rendered by the webhook service
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error type
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message
    pub message: String,
    /// Upstream Botads error code, when the failure came from the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl BotadsError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        BotadsError::Config(message.into())
    }

    /// Get HTTP status code used when the error is surfaced by the webhook service
    pub fn status_code(&self) -> StatusCode {
        match self {
            BotadsError::InvalidSignature => StatusCode::UNAUTHORIZED,
            BotadsError::Decode(_) => StatusCode::BAD_REQUEST,
            BotadsError::Transport(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            BotadsError::Transport(_) | BotadsError::Api(_) => StatusCode::BAD_GATEWAY,
            BotadsError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            BotadsError::InvalidSignature => "authentication_error",
            BotadsError::Decode(_) => "invalid_request_error",
            BotadsError::Transport(e) if e.is_timeout() => "timeout_error",
            BotadsError::Transport(_) => "transport_error",
            BotadsError::Api(_) => "api_error",
            BotadsError::Config(_) => "configuration_error",
        }
    }

    /// Structured API error, if this is one
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            BotadsError::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Convert to the response body format
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorBody {
                error_type: self.error_type().to_string(),
                message: self.to_string(),
                code: self.as_api_error().map(|e| e.error_code.clone()),
            },
        }
    }
}

impl IntoResponse for BotadsError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Signature failures are security events, not server faults
        match self {
            BotadsError::InvalidSignature | BotadsError::Decode(_) => {
                tracing::warn!("Rejected webhook request: {} - Status code: {}", self, status);
            }
            _ => {
                tracing::error!("Request failed: {} - Status code: {}", self, status);
            }
        }

        (status, Json(self.to_error_response())).into_response()
    }
}

/// Result type alias
pub type BotadsResult<T> = Result<T, BotadsError>;

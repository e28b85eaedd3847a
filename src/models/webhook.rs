//! Webhook notification data models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Decoded webhook notification
///
/// Only meaningful once the body it came from passed signature verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    /// Event symbol, kept verbatim
    pub event: String,
    /// User the original code was requested for
    pub user_tg_id: String,
    /// Additional service fields, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

/// Known webhook event kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WebhookEvent {
    /// User finished watching a rewarded ad
    Rewarded,
    /// User clicked a direct link
    DirectLink,
    /// Any event this SDK version does not know about
    Other(String),
}

impl WebhookEvent {
    pub fn as_str(&self) -> &str {
        match self {
            WebhookEvent::Rewarded => "rewarded",
            WebhookEvent::DirectLink => "direct_link",
            WebhookEvent::Other(name) => name,
        }
    }
}

impl From<&str> for WebhookEvent {
    fn from(value: &str) -> Self {
        match value {
            "rewarded" => WebhookEvent::Rewarded,
            "direct_link" => WebhookEvent::DirectLink,
            other => WebhookEvent::Other(other.to_string()),
        }
    }
}

impl fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WebhookPayload {
    /// Classify the event symbol
    pub fn kind(&self) -> WebhookEvent {
        WebhookEvent::from(self.event.as_str())
    }

    /// Look up a field of `data`
    pub fn data_field(&self, key: &str) -> Option<&Value> {
        self.data.as_ref().and_then(|data| data.get(key))
    }
}

//! Short-code issuance data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /client/v1/codes`
///
/// The service expects `bot_id` as a JSON string even though it is numeric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRequest {
    pub bot_id: String,
    pub user_tg_id: String,
}

impl CodeRequest {
    pub fn new(bot_id: i64, user_tg_id: impl Into<String>) -> Self {
        Self {
            bot_id: bot_id.to_string(),
            user_tg_id: user_tg_id.into(),
        }
    }
}

/// Successfully issued short code
///
/// `expires_in` and `expires_at` are copied from the service verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeResponse {
    /// Opaque code identifying the grant
    pub code: String,
    /// Seconds of validity from issuance
    #[serde(deserialize_with = "deserialize_lenient_int")]
    pub expires_in: i64,
    /// Absolute expiry as sent by the service
    pub expires_at: String,
}

impl CodeResponse {
    /// Direct link for this code under the given base URL
    pub fn direct_link(&self, base_url: &str) -> String {
        if base_url.ends_with('/') {
            format!("{}{}", base_url, self.code)
        } else {
            format!("{}/{}", base_url, self.code)
        }
    }

    /// Parse `expires_at` as an RFC 3339 timestamp
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.expires_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Accept an integer, an integer-valued string, or a float (truncated)
fn deserialize_lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if let Some(f) = n.as_f64().filter(|f| f.is_finite()) {
                Ok(f.trunc() as i64)
            } else {
                Err(D::Error::custom(format!("expires_in out of range: {}", n)))
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("expires_in is not an integer: {:?}", s))),
        other => Err(D::Error::custom(format!(
            "expires_in must be an integer, got {}",
            other
        ))),
    }
}

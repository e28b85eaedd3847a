//! Webhook body decoding

use crate::models::WebhookPayload;
use crate::utils::error::BotadsResult;

/// Decode a webhook body into a [`WebhookPayload`].
///
/// `event` and `user_tg_id` are mandatory, `data` is optional. No
/// authenticity check happens here: call this only after
/// [`verify_signature`](crate::webhook::verify_signature) returned true.
pub fn parse_webhook_payload(body: &[u8]) -> BotadsResult<WebhookPayload> {
    Ok(serde_json::from_slice(body)?)
}

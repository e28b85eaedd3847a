//! Botads webhook handler
//!
//! POST /webhook

use crate::handlers::AppState;
use crate::models::WebhookEvent;
use crate::utils::error::BotadsResult;
use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Verify and decode a webhook notification.
///
/// A bad signature is rejected with 401 before the body is looked at.
pub async fn handle_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> BotadsResult<Json<Value>> {
    let signature = headers
        .get(state.settings.webhook.signature_header.as_str())
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let payload = state.verifier.verify_and_parse(&body, signature)?;

    match payload.kind() {
        WebhookEvent::Rewarded => {
            info!("Rewarded ad completed by user {}", payload.user_tg_id);
        }
        WebhookEvent::DirectLink => {
            info!("Direct link click confirmed for user {}", payload.user_tg_id);
        }
        WebhookEvent::Other(event) => {
            info!("Unhandled Botads event {} for user {}", event, payload.user_tg_id);
        }
    }

    Ok(Json(json!({ "status": "ok" })))
}

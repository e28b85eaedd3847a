//! Code issuance handler
//!
//! POST /codes

use crate::handlers::AppState;
use crate::models::CodeResponse;
use crate::utils::error::{BotadsError, BotadsResult};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

/// Request body
#[derive(Debug, Deserialize)]
pub struct CreateCodeRequest {
    pub user_tg_id: String,
}

/// Issued code together with its ready-to-send link
#[derive(Debug, Serialize, Deserialize)]
pub struct IssuedCode {
    #[serde(flatten)]
    pub code: CodeResponse,
    pub direct_link: String,
}

/// Issue a code for the configured bot
pub async fn create_code(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateCodeRequest>,
) -> BotadsResult<Response> {
    if request.user_tg_id.trim().is_empty() {
        warn!("Code request without user_tg_id");
        let body = json!({
            "error": { "type": "invalid_request_error", "message": "user_tg_id cannot be empty" }
        });
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    }

    let code = match state
        .issuer
        .create_code(state.settings.botads.bot_id, &request.user_tg_id)
        .await
    {
        Ok(code) => code,
        // Upstream body, not the caller's input
        Err(BotadsError::Decode(e)) => {
            error!("Malformed code response from Botads: {}", e);
            let body = json!({
                "error": { "type": "api_error", "message": "Malformed response from Botads" }
            });
            return Ok((StatusCode::BAD_GATEWAY, Json(body)).into_response());
        }
        Err(e) => return Err(e),
    };
    let direct_link = code.direct_link(&state.settings.botads.direct_link_base_url);

    Ok(Json(IssuedCode { code, direct_link }).into_response())
}

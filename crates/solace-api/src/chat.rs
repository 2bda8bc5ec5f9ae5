use axum::{Json, extract::State};
use axum_extra::extract::WithRejection;
use tracing::info;

use solace_types::api::{ChatRequest, ChatResponse};

use crate::AppState;
use crate::error::ApiError;

pub const MAX_MESSAGE_CHARS: usize = 2000;

/// POST /chat. Remote failures never reach the client: the dispatcher
/// answers from the fallback table instead.
pub async fn chat(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<ChatRequest>, ApiError>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = req.user_message.trim();
    if message.is_empty() {
        return Err(ApiError::validation("Message must not be empty"));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ApiError::validation(format!(
            "Message must be at most {} characters",
            MAX_MESSAGE_CHARS
        )));
    }

    info!(
        history = req.conversation_history.len(),
        "Chat request received"
    );

    let reply = state
        .dispatcher
        .respond(message, &req.conversation_history)
        .await;

    Ok(Json(ChatResponse {
        success: true,
        message: reply.message,
        source: reply.source,
    }))
}

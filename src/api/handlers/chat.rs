use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::ChatRequest;
use crate::api::dtos::responses::ok;
use std::sync::Arc;
use uuid::Uuid;
use tracing::info;

const QUICK_SUGGESTIONS: &[&str] = &[
    "Help me plan a wedding",
    "What vendors do I need for a birthday party?",
    "How do I set an event budget?",
    "Show me highly rated caterers",
    "What should my guest list look like?",
];

pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.message.trim().is_empty() {
        return Err(AppError::Validation("Message cannot be empty".into()));
    }

    let session_id = payload.session_id.unwrap_or_else(|| Uuid::new_v4().to_string());

    let response = state.chat_service
        .relay(&payload.message, &session_id, payload.context.as_ref())
        .await?;

    info!("Chat message relayed for session {}", session_id);

    Ok(ok(serde_json::json!({
        "session_id": session_id,
        "response": response,
    })))
}

pub async fn quick_suggestions() -> Result<impl IntoResponse, AppError> {
    Ok(ok(serde_json::json!({ "suggestions": QUICK_SUGGESTIONS })))
}

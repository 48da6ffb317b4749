//! Chat Routes
//!
//! Each session is one conversation with its own busy flag.
//!
//! - POST /api/v1/chat/sessions - Start a conversation
//! - GET /api/v1/chat/sessions/:id - Conversation log
//! - POST /api/v1/chat/sessions/:id/messages - Send a message
//! - DELETE /api/v1/chat/sessions/:id - Discard a conversation

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::dto::{SendMessageRequest, SendMessageResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::chat::{ChatError, ChatSession};
use crate::render::render_sections;

/// POST /api/v1/chat/sessions
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<ChatSession>)> {
    let session = state.create_session().await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/v1/chat/sessions/:id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ChatSession>> {
    let session = state.session(id).await?;
    let snapshot = session.lock().await.clone();
    Ok(Json(snapshot))
}

/// POST /api/v1/chat/sessions/:id/messages
///
/// A collaborator failure is not an HTTP error: the conversation gains a
/// system message, which is returned like any other reply. A second message
/// while a reply is pending gets 409.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> ApiResult<Json<SendMessageResponse>> {
    let Json(req) = payload?;
    if !state.ai.is_configured() {
        return Err(ChatError::Unconfigured.into());
    }

    let session = state.session(id).await?;
    let request = session.lock().await.begin_turn(&req.text)?;

    // The turn runs to completion even if this request is dropped, so the
    // session never stays busy.
    let ai = state.ai.clone();
    let turn = tokio::spawn(async move {
        let result = ai.generate(&request).await;
        session.lock().await.finish_turn(result).clone()
    });

    let message = turn
        .await
        .map_err(|e| ApiError::Internal(format!("chat turn failed: {}", e)))?;
    let sections = render_sections(&message.text);

    Ok(Json(SendMessageResponse { message, sections }))
}

/// DELETE /api/v1/chat/sessions/:id
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.remove_session(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

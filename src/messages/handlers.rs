use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{repo_types::Message, services::Conversation};
use crate::{
    auth::jwt::AuthUser,
    error::AppResult,
    extract::{AppJson, AppPath},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub receiver_id: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    pub marked: usize,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/messages", get(list_conversations).post(send_message))
        .route("/messages/:partner_id", get(conversation))
        .route("/messages/:partner_id/read", post(mark_read))
}

#[instrument(skip(state))]
pub async fn list_conversations(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Json<Vec<Conversation>> {
    Json(state.messages.conversations(&user_id))
}

#[instrument(skip(state, body))]
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(body): AppJson<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<Message>)> {
    let message = state
        .messages
        .send(&user_id, &body.receiver_id, &body.content)?;
    Ok((StatusCode::CREATED, Json(message)))
}

#[instrument(skip(state))]
pub async fn conversation(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppPath(partner_id): AppPath<String>,
) -> Json<Vec<Message>> {
    Json(state.messages.conversation_with(&user_id, &partner_id))
}

#[instrument(skip(state))]
pub async fn mark_read(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppPath(partner_id): AppPath<String>,
) -> Json<MarkReadResponse> {
    Json(MarkReadResponse {
        marked: state.messages.mark_read(&user_id, &partner_id),
    })
}

//! Router for the chat API

use std::path::Path;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
};
use uuid::Uuid;

use super::public;
use crate::ai::chat::Transcript;
use crate::api::public::{ApiError, bad_request};
use crate::api::state::AppState;
use crate::chat::store::is_valid_session_id;

type SharedState = Arc<AppState>;

// Empty strings are treated the same as a missing field
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Start a new session with a fresh system message
async fn new_session(
    State(state): State<SharedState>,
    Json(payload): Json<public::NewSessionRequest>,
) -> Result<Response, ApiError> {
    let Some(user_id) = required(payload.user_id) else {
        return Ok(bad_request("Missing user_id"));
    };

    let session_id = Uuid::new_v4().to_string();
    let mut chat = state.chat(Transcript::new());
    chat.reset_system_message(Path::new(&state.config.prompt_path))
        .await?;
    state.store.create(&session_id, chat.transcript()).await?;

    tracing::info!("Created session {} for user {}", session_id, user_id);

    Ok(Json(public::NewSessionResponse { session_id }).into_response())
}

/// Run the next turn of a session's chat and save the result
async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::ChatRequest>,
) -> Result<Response, ApiError> {
    let (Some(session_id), Some(user_input)) =
        (required(payload.session_id), required(payload.user_input))
    else {
        return Ok(bad_request("Missing session_id or user_input"));
    };
    if !is_valid_session_id(&session_id) {
        return Ok(bad_request("Invalid session_id"));
    }

    // An unknown session starts from an empty transcript without a
    // system message
    let transcript = state.store.load(&session_id).await?;
    let mut chat = state.chat(transcript);

    let result = chat.next_msg(&user_input).await;
    if let Err(e) = &result {
        tracing::error!(
            "Chat completion failed for session {}: {}. Root cause: {}",
            session_id,
            e,
            e.root_cause()
        );
    }

    state.store.save(&session_id, chat.transcript()).await?;

    Ok(Json(public::ChatResponse::from_result(result)).into_response())
}

/// Get the full transcript of a session
async fn history(
    State(state): State<SharedState>,
    Json(payload): Json<public::HistoryRequest>,
) -> Result<Response, ApiError> {
    let Some(session_id) = required(payload.session_id) else {
        return Ok(bad_request("Missing session_id"));
    };
    if !is_valid_session_id(&session_id) {
        return Ok(bad_request("Invalid session_id"));
    }

    let messages = state.store.load(&session_id).await?;

    Ok(Json(public::HistoryResponse { messages }).into_response())
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/new_session", post(new_session))
        .route("/chat", post(chat_handler))
        .route("/history", post(history))
}

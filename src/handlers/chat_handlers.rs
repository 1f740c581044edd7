use axum::{
    extract::{Path, Query},
    response::{IntoResponse, Response},
    Extension, Json,
};
use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::app_state::AppState;
use crate::models::{chat::CreateChatRequest, message::SendMessageRequest};
use crate::services::chat_service::ChatError;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody { error: message.to_string() })).into_response()
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = match &self {
            ChatError::InvalidTitle | ChatError::InvalidText => StatusCode::BAD_REQUEST,
            ChatError::NotFound => StatusCode::NOT_FOUND,
            ChatError::Internal(source) => {
                // Driver details stay in the logs; the client gets a
                // generic message.
                error!("internal error: {source}");
                return json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal server error");
            }
        };
        json_error(status, &self.to_string())
    }
}

/// Path ids must be non-negative integers; anything else is a caller error.
fn parse_chat_id(raw: &str) -> Result<i64, Response> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 0 => Ok(id),
        _ => Err(json_error(StatusCode::BAD_REQUEST, "invalid chat id")),
    }
}

// POST /chats/
pub async fn create_chat(
    Extension(state): Extension<AppState>,
    Json(payload): Json<CreateChatRequest>,
) -> Result<Response, ChatError> {
    let chat = state.chat_service.create_chat(&payload.title).await?;
    Ok((StatusCode::CREATED, Json(chat)).into_response())
}

// POST /chats/:id/messages/
pub async fn create_message(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SendMessageRequest>,
) -> Response {
    let chat_id = match parse_chat_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match state.chat_service.create_message(chat_id, &payload.text).await {
        Ok(message) => (StatusCode::CREATED, Json(message)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[derive(Deserialize)]
pub struct GetChatParams {
    limit: Option<String>,
}

// GET /chats/:id?limit=N
pub async fn get_chat(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    Query(params): Query<GetChatParams>,
) -> Response {
    let chat_id = match parse_chat_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    // A missing or non-numeric limit falls through to the service default.
    let limit = params
        .limit
        .as_deref()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(0);

    match state.chat_service.get_chat(chat_id, limit).await {
        Ok(chat) => Json(chat).into_response(),
        Err(err) => err.into_response(),
    }
}

// DELETE /chats/:id
pub async fn delete_chat(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Response {
    let chat_id = match parse_chat_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match state.chat_service.delete_chat(chat_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

// src/routes/app_routes.rs

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::handlers::chat_handlers::{create_chat, create_message, delete_chat, get_chat};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/chats/", post(create_chat))
        .route("/chats/:id/messages/", post(create_message))
        .route("/chats/:id", get(get_chat).delete(delete_chat))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}

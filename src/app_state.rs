use crate::services::chat_service::ChatService;

/// Shared application state injected into handlers via `Extension`.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: ChatService,
}

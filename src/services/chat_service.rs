// services/chat_service.rs

use std::sync::Arc;

use thiserror::Error;

use crate::models::{chat::Chat, message::Message};
use crate::repositories::chat_repository::{ChatRepository, RepoError};

const TITLE_MAX_CHARS: usize = 200;
const TEXT_MAX_CHARS: usize = 5000;
const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// Domain error taxonomy returned by every service operation. The handler
/// layer switches on these to pick status codes.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("title must be between 1 and 200 chars")]
    InvalidTitle,

    #[error("text must be between 1 and 5000 chars")]
    InvalidText,

    #[error("not found")]
    NotFound,

    #[error("internal error")]
    Internal(#[source] RepoError),
}

impl From<RepoError> for ChatError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => ChatError::NotFound,
            other => ChatError::Internal(other),
        }
    }
}

/// Validation and orchestration over the chat repository. Holds no state of
/// its own beyond the repository handle.
#[derive(Clone)]
pub struct ChatService {
    repo: Arc<dyn ChatRepository>,
}

impl ChatService {
    pub fn new(repo: Arc<dyn ChatRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_chat(&self, title: &str) -> Result<Chat, ChatError> {
        let title = title.trim();
        let len = title.chars().count();
        if len == 0 || len > TITLE_MAX_CHARS {
            return Err(ChatError::InvalidTitle);
        }

        let chat = self.repo.create_chat(title).await?;
        Ok(chat)
    }

    pub async fn create_message(&self, chat_id: i64, text: &str) -> Result<Message, ChatError> {
        // Text is deliberately not trimmed; raw length is what counts.
        let len = text.chars().count();
        if len == 0 || len > TEXT_MAX_CHARS {
            return Err(ChatError::InvalidText);
        }

        let message = self.repo.create_message(chat_id, text).await?;
        Ok(message)
    }

    pub async fn get_chat(&self, chat_id: i64, limit: i64) -> Result<Chat, ChatError> {
        let limit = clamp_limit(limit);

        let chat = self.repo.get_chat_with_messages(chat_id, limit).await?;
        Ok(chat)
    }

    pub async fn delete_chat(&self, chat_id: i64) -> Result<(), ChatError> {
        let affected = self.repo.delete_chat(chat_id).await?;
        if affected == 0 {
            return Err(ChatError::NotFound);
        }
        Ok(())
    }
}

/// Never trust a caller-supplied limit outside [1, 100].
fn clamp_limit(limit: i64) -> i64 {
    if limit <= 0 {
        DEFAULT_LIMIT
    } else if limit > MAX_LIMIT {
        MAX_LIMIT
    } else {
        limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory_repository::MemoryChatRepository;

    fn service() -> ChatService {
        ChatService::new(Arc::new(MemoryChatRepository::new()))
    }

    #[tokio::test]
    async fn create_chat_trims_title() {
        let svc = service();

        let chat = svc.create_chat("  Go Developers  ").await.unwrap();
        assert_eq!(chat.title, "Go Developers");
        assert!(chat.messages.is_empty());
    }

    #[tokio::test]
    async fn create_chat_rejects_empty_and_whitespace_titles() {
        let svc = service();

        assert!(matches!(
            svc.create_chat("").await,
            Err(ChatError::InvalidTitle)
        ));
        assert!(matches!(
            svc.create_chat("   ").await,
            Err(ChatError::InvalidTitle)
        ));
    }

    #[tokio::test]
    async fn create_chat_enforces_max_title_length() {
        let svc = service();

        let at_limit = "a".repeat(200);
        assert!(svc.create_chat(&at_limit).await.is_ok());

        let over_limit = "a".repeat(201);
        assert!(matches!(
            svc.create_chat(&over_limit).await,
            Err(ChatError::InvalidTitle)
        ));
    }

    #[tokio::test]
    async fn create_message_validates_raw_length_without_trimming() {
        let svc = service();
        let chat = svc.create_chat("general").await.unwrap();

        // Whitespace-only text is valid: length is raw, not trimmed.
        let msg = svc.create_message(chat.id, "   ").await.unwrap();
        assert_eq!(msg.text, "   ");

        assert!(matches!(
            svc.create_message(chat.id, "").await,
            Err(ChatError::InvalidText)
        ));

        let over_limit = "x".repeat(5001);
        assert!(matches!(
            svc.create_message(chat.id, &over_limit).await,
            Err(ChatError::InvalidText)
        ));

        let at_limit = "x".repeat(5000);
        assert!(svc.create_message(chat.id, &at_limit).await.is_ok());
    }

    #[tokio::test]
    async fn create_message_for_missing_chat_is_not_found() {
        let svc = service();

        assert!(matches!(
            svc.create_message(999999, "hi").await,
            Err(ChatError::NotFound)
        ));
    }

    #[tokio::test]
    async fn validation_runs_before_the_repository_is_touched() {
        let svc = service();

        // Invalid text on a missing chat reports InvalidText, not NotFound.
        assert!(matches!(
            svc.create_message(999999, "").await,
            Err(ChatError::InvalidText)
        ));
    }

    #[test]
    fn clamp_limit_bounds() {
        assert_eq!(clamp_limit(0), 20);
        assert_eq!(clamp_limit(-5), 20);
        assert_eq!(clamp_limit(1), 1);
        assert_eq!(clamp_limit(100), 100);
        assert_eq!(clamp_limit(101), 100);
        assert_eq!(clamp_limit(500), 100);
    }

    #[tokio::test]
    async fn get_chat_clamps_limit() {
        let svc = service();
        let chat = svc.create_chat("busy").await.unwrap();

        for i in 0..120 {
            svc.create_message(chat.id, &format!("msg {i}")).await.unwrap();
        }

        // limit <= 0 falls back to the default of 20
        let fetched = svc.get_chat(chat.id, 0).await.unwrap();
        assert_eq!(fetched.messages.len(), 20);

        let fetched = svc.get_chat(chat.id, -5).await.unwrap();
        assert_eq!(fetched.messages.len(), 20);

        // limit > 100 is capped at 100 even though more messages exist
        let fetched = svc.get_chat(chat.id, 500).await.unwrap();
        assert_eq!(fetched.messages.len(), 100);

        let fetched = svc.get_chat(chat.id, 5).await.unwrap();
        assert_eq!(fetched.messages.len(), 5);
    }

    #[tokio::test]
    async fn get_chat_returns_messages_newest_first() {
        let svc = service();
        let chat = svc.create_chat("ordered").await.unwrap();

        svc.create_message(chat.id, "first").await.unwrap();
        svc.create_message(chat.id, "second").await.unwrap();
        svc.create_message(chat.id, "third").await.unwrap();

        let fetched = svc.get_chat(chat.id, 20).await.unwrap();
        let texts: Vec<&str> = fetched.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn get_chat_for_missing_chat_is_not_found() {
        let svc = service();

        assert!(matches!(
            svc.get_chat(42, 20).await,
            Err(ChatError::NotFound)
        ));
    }

    #[tokio::test]
    async fn delete_chat_succeeds_once_then_reports_not_found() {
        let svc = service();
        let chat = svc.create_chat("doomed").await.unwrap();
        svc.create_message(chat.id, "gone soon").await.unwrap();

        svc.delete_chat(chat.id).await.unwrap();

        assert!(matches!(
            svc.delete_chat(chat.id).await,
            Err(ChatError::NotFound)
        ));
        assert!(matches!(
            svc.get_chat(chat.id, 20).await,
            Err(ChatError::NotFound)
        ));
    }

    #[tokio::test]
    async fn full_scenario_create_message_fetch() {
        let svc = service();

        let chat = svc.create_chat("  Go Developers  ").await.unwrap();
        assert_eq!(chat.title, "Go Developers");

        let msg = svc.create_message(chat.id, "Hello World").await.unwrap();
        assert_eq!(msg.chat_id, chat.id);
        assert_eq!(msg.text, "Hello World");

        let fetched = svc.get_chat(chat.id, 20).await.unwrap();
        assert_eq!(fetched.messages.len(), 1);
        assert_eq!(fetched.messages[0].text, "Hello World");
    }
}

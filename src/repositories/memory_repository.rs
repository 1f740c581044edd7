// repositories/memory_repository.rs

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::models::{chat::Chat, message::Message};
use crate::repositories::chat_repository::{ChatRepository, RepoError};

/// In-memory `ChatRepository` used by tests in place of a live database.
/// Mirrors the Postgres schema semantics: auto-incremented ids, cascading
/// delete of messages, newest-first message ordering.
#[derive(Default)]
pub struct MemoryChatRepository {
    inner: Mutex<State>,
}

#[derive(Default)]
struct State {
    chats: Vec<Chat>,
    messages: Vec<Message>,
    next_chat_id: i64,
    next_message_id: i64,
}

impl MemoryChatRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatRepository for MemoryChatRepository {
    async fn create_chat(&self, title: &str) -> Result<Chat, RepoError> {
        let mut state = self.inner.lock().unwrap();
        state.next_chat_id += 1;

        let chat = Chat {
            id: state.next_chat_id,
            title: title.to_string(),
            created_at: Utc::now(),
            messages: Vec::new(),
        };
        state.chats.push(chat.clone());

        Ok(chat)
    }

    async fn create_message(&self, chat_id: i64, text: &str) -> Result<Message, RepoError> {
        let mut state = self.inner.lock().unwrap();

        if !state.chats.iter().any(|c| c.id == chat_id) {
            return Err(RepoError::NotFound);
        }

        state.next_message_id += 1;
        let message = Message {
            id: state.next_message_id,
            chat_id,
            text: text.to_string(),
            created_at: Utc::now(),
        };
        state.messages.push(message.clone());

        Ok(message)
    }

    async fn get_chat_with_messages(&self, chat_id: i64, limit: i64) -> Result<Chat, RepoError> {
        let state = self.inner.lock().unwrap();

        let mut chat = state
            .chats
            .iter()
            .find(|c| c.id == chat_id)
            .cloned()
            .ok_or(RepoError::NotFound)?;

        let mut messages: Vec<Message> = state
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect();
        // Newest first; id breaks ties between same-instant inserts.
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        messages.truncate(limit as usize);

        chat.messages = messages;
        Ok(chat)
    }

    async fn delete_chat(&self, chat_id: i64) -> Result<u64, RepoError> {
        let mut state = self.inner.lock().unwrap();

        let before = state.chats.len();
        state.chats.retain(|c| c.id != chat_id);
        let removed = (before - state.chats.len()) as u64;

        if removed > 0 {
            state.messages.retain(|m| m.chat_id != chat_id);
        }

        Ok(removed)
    }
}

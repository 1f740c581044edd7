// repositories/chat_repository.rs

use async_trait::async_trait;
use deadpool_postgres::Pool;
use thiserror::Error;
use tokio_postgres::Row;

use crate::models::{chat::Chat, message::Message};

/// Errors surfaced by the persistence layer. `NotFound` is the uniform
/// "no matching row" signal; callers never inspect driver errors directly.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("record not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),
}

/// Persistence contract consumed by the service layer.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn create_chat(&self, title: &str) -> Result<Chat, RepoError>;

    /// Inserts a message for an existing chat. Fails with `RepoError::NotFound`
    /// when the referenced chat is absent; never inserts an orphan row.
    async fn create_message(&self, chat_id: i64, text: &str) -> Result<Message, RepoError>;

    /// Fetches a chat together with up to `limit` of its messages,
    /// most recent first.
    async fn get_chat_with_messages(&self, chat_id: i64, limit: i64) -> Result<Chat, RepoError>;

    /// Deletes a chat (messages cascade at the schema level) and returns the
    /// number of rows removed.
    async fn delete_chat(&self, chat_id: i64) -> Result<u64, RepoError>;
}

pub struct PgChatRepository {
    pool: Pool,
}

impl PgChatRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn chat_from_row(row: &Row) -> Chat {
    Chat {
        id: row.get(0),
        title: row.get(1),
        created_at: row.get(2),
        messages: Vec::new(),
    }
}

fn message_from_row(row: &Row) -> Message {
    Message {
        id: row.get(0),
        chat_id: row.get(1),
        text: row.get(2),
        created_at: row.get(3),
    }
}

#[async_trait]
impl ChatRepository for PgChatRepository {
    async fn create_chat(&self, title: &str) -> Result<Chat, RepoError> {
        let client = self.pool.get().await?;

        let query = "
            INSERT INTO chats (title)
            VALUES ($1)
            RETURNING id, title, created_at
        ";
        let row = client.query_one(query, &[&title]).await?;

        Ok(chat_from_row(&row))
    }

    async fn create_message(&self, chat_id: i64, text: &str) -> Result<Message, RepoError> {
        let client = self.pool.get().await?;

        // Explicit existence check so a missing chat surfaces as NotFound
        // instead of a foreign-key violation.
        let exists_query = "SELECT 1 FROM chats WHERE id = $1";
        if client.query_opt(exists_query, &[&chat_id]).await?.is_none() {
            return Err(RepoError::NotFound);
        }

        let query = "
            INSERT INTO messages (chat_id, text)
            VALUES ($1, $2)
            RETURNING id, chat_id, text, created_at
        ";
        let row = client.query_one(query, &[&chat_id, &text]).await?;

        Ok(message_from_row(&row))
    }

    async fn get_chat_with_messages(&self, chat_id: i64, limit: i64) -> Result<Chat, RepoError> {
        let client = self.pool.get().await?;

        let chat_query = "
            SELECT id, title, created_at
            FROM chats
            WHERE id = $1
        ";
        let row = client
            .query_opt(chat_query, &[&chat_id])
            .await?
            .ok_or(RepoError::NotFound)?;

        let mut chat = chat_from_row(&row);

        let messages_query = "
            SELECT id, chat_id, text, created_at
            FROM messages
            WHERE chat_id = $1
            ORDER BY created_at DESC
            LIMIT $2
        ";
        let rows = client.query(messages_query, &[&chat_id, &limit]).await?;

        chat.messages = rows.iter().map(message_from_row).collect();

        Ok(chat)
    }

    async fn delete_chat(&self, chat_id: i64) -> Result<u64, RepoError> {
        let client = self.pool.get().await?;

        let query = "DELETE FROM chats WHERE id = $1";
        let affected = client.execute(query, &[&chat_id]).await?;

        Ok(affected)
    }
}

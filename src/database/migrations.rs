use tokio_postgres::Client;

// Applies the schema at startup. Idempotent: every statement is IF NOT EXISTS.
pub async fn apply_migrations(client: &Client) -> Result<(), String> {
    let create_chats_table_query = "
        CREATE TABLE IF NOT EXISTS chats (
            id BIGSERIAL PRIMARY KEY,
            title VARCHAR(200) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
    ";
    client
        .execute(create_chats_table_query, &[])
        .await
        .map_err(|e| format!("Error creating chats table: {}", e))?;

    // Messages cascade when their owning chat is deleted; the application
    // never deletes them individually.
    let create_messages_table_query = "
        CREATE TABLE IF NOT EXISTS messages (
            id BIGSERIAL PRIMARY KEY,
            chat_id BIGINT NOT NULL REFERENCES chats(id) ON DELETE CASCADE,
            text TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
    ";
    client
        .execute(create_messages_table_query, &[])
        .await
        .map_err(|e| format!("Error creating messages table: {}", e))?;

    let create_messages_index_query = "
        CREATE INDEX IF NOT EXISTS idx_messages_chat_id ON messages (chat_id)
    ";
    client
        .execute(create_messages_index_query, &[])
        .await
        .map_err(|e| format!("Error creating messages index: {}", e))?;

    Ok(())
}

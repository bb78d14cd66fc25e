use async_trait::async_trait;
use bacheca_core::{new_message_id, now_timestamp, Message};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use super::{MessageStore, StoreError};

/// Store durevole su SQLite. L'ordine di inserimento è quello del `rowid`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_message(row: &SqliteRow) -> Result<Message, StoreError> {
    let corrupt = |e: sqlx::Error| StoreError::Corrupt(e.to_string());
    let id: String = row.try_get("message_id").map_err(corrupt)?;
    let text: String = row.try_get("content").map_err(corrupt)?;
    let created_at: String = row.try_get("created_at").map_err(corrupt)?;
    Ok(Message::stored(id, text, created_at))
}

#[async_trait]
impl MessageStore for SqliteStore {
    async fn find_all(&self) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query("SELECT message_id, content, created_at FROM messages ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_message).collect()
    }

    async fn create(&self, text: &str) -> Result<Message, StoreError> {
        let message_id = new_message_id();
        let created_at = now_timestamp();

        // un solo INSERT: se fallisce non resta nessuna riga parziale
        sqlx::query("INSERT INTO messages (message_id, content, created_at) VALUES (?, ?, ?)")
            .bind(&message_id)
            .bind(text)
            .bind(&created_at)
            .execute(&self.pool)
            .await?;

        Ok(Message::stored(message_id, text, created_at))
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        let done = sqlx::query("DELETE FROM messages").execute(&self.pool).await?;
        tracing::debug!(deleted = done.rows_affected(), "messages deleted");
        Ok(())
    }

    async fn health(&self) -> Result<(), StoreError> {
        self.pool.acquire().await?;
        Ok(())
    }
}

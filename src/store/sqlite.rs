use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{instrument, warn};

use super::{MessageStore, StoreError};
use crate::models::{ContactRequest, Message};

/// SQLite-backed store. Timestamps are written with millisecond precision
/// so that ordering by `created_at` is meaningful within one second.
#[derive(Clone)]
pub struct SqliteMessageStore {
    pool: SqlitePool,
}

impl SqliteMessageStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteMessageStore { pool }
    }
}

#[async_trait]
impl MessageStore for SqliteMessageStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at DATETIME NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[instrument(skip_all)]
    async fn create(&self, request: ContactRequest) -> Result<Message, StoreError> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (name, email, message)
            VALUES (?, ?, ?)
            RETURNING id, name, email, message, created_at
            "#,
        )
        .bind(request.name)
        .bind(request.email)
        .bind(request.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    #[instrument(skip_all)]
    async fn list_all(&self) -> Result<Vec<Message>, StoreError> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, name, email, message, created_at
            FROM messages
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    #[instrument(skip_all)]
    async fn ping(&self) -> bool {
        match sqlx::query("SELECT id FROM messages LIMIT 1")
            .fetch_optional(&self.pool)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "SQLite ping failed");
                false
            }
        }
    }
}

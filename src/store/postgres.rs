use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{instrument, warn};

use super::{MessageStore, StoreError};
use crate::models::{ContactRequest, Message};

#[derive(Clone)]
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    pub fn new(pool: PgPool) -> Self {
        PgMessageStore { pool }
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
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
            VALUES ($1, $2, $3)
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
                warn!(error = %e, "Postgres ping failed");
                false
            }
        }
    }
}

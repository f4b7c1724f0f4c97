//! Persistence for contact messages.
//!
//! One table, `messages`, created on startup if absent. Backends are picked
//! from the connection URL scheme; see [`crate::clients::setup_message_store`].

mod postgres;
mod sqlite;

pub use postgres::PgMessageStore;
pub use sqlite::SqliteMessageStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ContactRequest, Message};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("unsupported database url scheme: {0}")]
    UnsupportedUrl(String),
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Create the `messages` table if it does not exist yet.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Persist a submission. Any text is accepted, including empty strings.
    async fn create(&self, request: ContactRequest) -> Result<Message, StoreError>;

    /// All messages, newest first.
    async fn list_all(&self) -> Result<Vec<Message>, StoreError>;

    /// Liveness probe for health reporting. Never errors.
    async fn ping(&self) -> bool;
}

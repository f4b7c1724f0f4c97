use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::config::{EngineConfig, GatewayConfig};
use crate::gateway::EngineClient;
use crate::store::{MessageStore, PgMessageStore, SqliteMessageStore, StoreError};

/// Upper bound on waiting for a pooled connection. Keeps health pings bounded.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connects to the database named by `DATABASE_URL` and returns the matching store.
///
/// The schema is not touched here; callers run [`MessageStore::ensure_schema`].
pub async fn setup_message_store(config: &EngineConfig) -> Result<Arc<dyn MessageStore>, StoreError> {
    let url = config.database_url.as_str();

    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(url)
            .await?;
        info!(backend = "postgres", "Database pool created.");
        return Ok(Arc::new(PgMessageStore::new(pool)));
    }

    if url.starts_with("sqlite:") {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        // Each connection to an in-memory database sees its own copy, so pin
        // the pool to a single connection that never expires.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.db_max_connections)
        };
        let pool = pool_options
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await?;
        info!(backend = "sqlite", in_memory, "Database pool created.");
        return Ok(Arc::new(SqliteMessageStore::new(pool)));
    }

    let scheme = url.split(':').next().unwrap_or_default().to_string();
    Err(StoreError::UnsupportedUrl(scheme))
}

/// Builds the gateway's pooled HTTP client for talking to the engine.
pub fn setup_engine_client(config: &GatewayConfig) -> Result<EngineClient, reqwest::Error> {
    let mut builder = reqwest::Client::builder();
    if let Some(ms) = config.engine_request_timeout_ms {
        builder = builder.timeout(Duration::from_millis(ms));
    }
    let http = builder.build()?;

    Ok(EngineClient::new(
        http,
        config.engine_base_url(),
        Duration::from_millis(config.health_timeout_ms),
    ))
}

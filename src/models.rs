use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Version reported by the engine's health endpoint.
pub const ENGINE_VERSION: &str = "v27.2.0";

/// A persisted contact-form submission.
#[derive(Debug, Clone, FromRow)]
pub struct Message {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Contact submission as accepted by both tiers: JSON on the engine,
/// urlencoded form fields on the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Wire shape of a message returned by `GET /messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub date: String,
}

impl From<Message> for MessageView {
    fn from(message: Message) -> Self {
        MessageView {
            id: message.id,
            name: message.name,
            email: message.email,
            message: message.message,
            date: message.created_at.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactReceipt {
    pub status: String,
}

impl ContactReceipt {
    pub fn received() -> Self {
        ContactReceipt {
            status: "Received".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceState {
    Operational,
    /// Only ever assumed by the gateway after a successful submission.
    Online,
    Degraded,
    Offline,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DbState {
    Connected,
    Disconnected,
    Unknown,
}

/// Display-only health summary. Computed per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub status: ServiceState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db: Option<DbState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl SystemStatus {
    pub fn operational() -> Self {
        SystemStatus {
            status: ServiceState::Operational,
            db: Some(DbState::Connected),
            version: Some(ENGINE_VERSION.to_string()),
        }
    }

    pub fn store_unreachable() -> Self {
        SystemStatus {
            status: ServiceState::Degraded,
            db: Some(DbState::Disconnected),
            version: Some(ENGINE_VERSION.to_string()),
        }
    }

    /// Shown by the gateway when the engine cannot be asked.
    pub fn offline() -> Self {
        SystemStatus {
            status: ServiceState::Offline,
            db: Some(DbState::Unknown),
            version: None,
        }
    }

    /// Assumed after a forwarded submission succeeds; not re-fetched.
    pub fn assumed_online() -> Self {
        SystemStatus {
            status: ServiceState::Online,
            db: Some(DbState::Connected),
            version: None,
        }
    }

    /// Shown after a failed submission. Store state and version are withheld.
    pub fn degraded() -> Self {
        SystemStatus {
            status: ServiceState::Degraded,
            db: None,
            version: None,
        }
    }
}

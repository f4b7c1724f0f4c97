use serde::Deserialize;

/// Settings for the engine binary.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub database_url: String,
    #[serde(default = "default_host")]
    pub engine_host: String,
    #[serde(default = "default_engine_port")]
    pub engine_port: u16,
    #[serde(default = "default_max_connections")]
    pub db_max_connections: u32,
}

/// Settings for the gateway binary.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_engine_url")]
    pub engine_url: String,
    #[serde(default = "default_health_timeout")]
    pub health_timeout_ms: u64,
    /// Bounds the contact-forward and messages calls. Unbounded when unset.
    pub engine_request_timeout_ms: Option<u64>,
    #[serde(default = "default_host")]
    pub gateway_host: String,
    #[serde(default = "default_gateway_port")]
    pub gateway_port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_engine_port() -> u16 {
    8002
}

fn default_gateway_port() -> u16 {
    8000
}

fn default_max_connections() -> u32 {
    5
}

fn default_engine_url() -> String {
    "http://localhost:8002".to_string()
}

fn default_health_timeout() -> u64 {
    2000 // Default to 2 seconds
}

impl EngineConfig {
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        envy::from_env::<EngineConfig>()
    }
}

impl GatewayConfig {
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        envy::from_env::<GatewayConfig>()
    }

    /// Engine base URL without a trailing slash, ready for path joins.
    pub fn engine_base_url(&self) -> &str {
        self.engine_url.trim_end_matches('/')
    }
}

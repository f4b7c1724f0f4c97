//! Contact relay: a gateway that renders pages and proxies a contact form,
//! and an engine that stores the submitted messages.
//!
//! The two tiers ship as the `gateway` and `engine` binaries.

pub mod clients;
pub mod config;
pub mod engine;
pub mod gateway;
pub mod models;
pub mod store;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber. `RUST_LOG` adds directives on top of INFO.
pub fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();
}

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use contact_relay::clients::setup_engine_client;
use contact_relay::config::GatewayConfig;
use contact_relay::gateway::{self, GatewayState, Views};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    contact_relay::setup_logging();

    info!("Loading configuration...");
    let config = GatewayConfig::load()?;
    info!(engine_url = %config.engine_base_url(), "Configuration loaded.");

    let engine = setup_engine_client(&config)?;
    let views = Views::new()?;
    let state = web::Data::new(GatewayState::new(engine, views));

    info!(host = %config.gateway_host, port = config.gateway_port, "Starting gateway...");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(gateway::configure)
    })
    .bind((config.gateway_host.as_str(), config.gateway_port))?
    .run()
    .await?;

    info!("Gateway shutting down.");
    Ok(())
}

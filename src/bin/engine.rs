use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use contact_relay::clients::setup_message_store;
use contact_relay::config::EngineConfig;
use contact_relay::engine;
use contact_relay::store::MessageStore;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    contact_relay::setup_logging();

    info!("Loading configuration...");
    let config = EngineConfig::load()?;
    info!("Configuration loaded.");

    info!("Connecting to database...");
    let store = setup_message_store(&config).await?;
    store.ensure_schema().await?;
    info!("Database ready.");

    let store: web::Data<dyn MessageStore> = web::Data::from(store);

    info!(host = %config.engine_host, port = config.engine_port, "Starting engine API...");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(store.clone())
            .configure(engine::configure)
    })
    .bind((config.engine_host.as_str(), config.engine_port))?
    .run()
    .await?;

    info!("Engine shutting down.");
    Ok(())
}

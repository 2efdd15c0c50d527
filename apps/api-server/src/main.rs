//! # Manuscript API Server
//!
//! The main entry point for the Actix-web HTTP server fronting the
//! concurrent draft store.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let telemetry_config = telemetry::TelemetryConfig::from_env();
    telemetry::init_telemetry(&telemetry_config);

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Manuscript API server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await;

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

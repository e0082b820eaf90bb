use actix_web::{App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod model;
mod service;

use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    config.report_missing_credentials();
    let bind_addr = config.bind_addr();

    let state = AppState::new(&config);
    let verification_service = state.verification_service;
    let capabilities = state.capabilities;
    let cors_allowed_origins = config.cors_allowed_origins.clone();

    if cors_allowed_origins.is_empty() {
        tracing::info!("CORS: accepting any origin");
    } else {
        tracing::info!(origins = ?cors_allowed_origins, "CORS: accepting listed origins");
    }

    tracing::info!("Starting CrediCheck server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(api::cors::cors(&cors_allowed_origins))
            .app_data(verification_service.clone())
            .app_data(capabilities.clone())
            .configure(api::verify::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}

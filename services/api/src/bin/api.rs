//! services/api/src/bin/api.rs

use adherence_core::CompletionStateCalculator;
use api_lib::{
    config::Config,
    error::ApiError,
    web::{health_handler, rest::ApiDoc, state::AppState, weekly_report_handler},
};
use axum::{
    http::{header::{ACCEPT, CONTENT_TYPE}, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        calculator: Arc::new(CompletionStateCalculator),
    });

    let cors = CorsLayer::new()
        .allow_origin(config.cors_allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    // --- 3. Create the Web Router ---
    let api_router = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/reports/weekly", post(weekly_report_handler))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 4. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

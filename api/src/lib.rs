//! HTTP adapter around the QA pipeline.
//!
//! A single route, `POST /search`, validated here and delegated to
//! `qa-gateway`. CORS is fully open in the reference configuration; there
//! is no authentication and no rate limiting.

mod core;
mod error_handler;
mod routes;

use std::{env, sync::Arc};

use axum::{Router, routing::post};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::core::app_state::AppState;
use crate::error_handler::AppError;
use crate::routes::search::search_route::search;

pub async fn start() -> Result<(), AppError> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".into());

    // All provider clients are constructed once here and shared read-only
    // across requests.
    let state = AppState::from_env()?;

    // Reference configuration: any origin, any method, any header.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/search", post(search))
        .layer(cors)
        .with_state(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;

    info!(target: "api::start", address = %host_url, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}

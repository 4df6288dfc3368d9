//! HTTP surface of the onboarding assistant.
//!
//! Routes:
//! - `GET  /`         liveness message
//! - `POST /ask`      answer a question from the stored context
//! - `GET  /context`  read the context document
//! - `POST /context`  replace the context document
//! - `GET  /history`  latest logged exchanges

pub mod core;
pub mod error_handler;
mod routes;


use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::{
    core::{app_state::AppState, server_config::ServerConfig},
    error_handler::AppError,
    routes::{
        ask::ask_route::ask,
        context::context_route::{get_context, set_context},
        history::history_route::history,
        root_route::root,
    },
};

/// Loads configuration from the environment and serves until Ctrl+C.
///
/// # Errors
/// Startup failures (missing configuration, bind errors) and fatal server I/O errors.
pub async fn start() -> Result<(), AppError> {
    let config = ServerConfig::from_env()?;
    let state = AppState::from_env()?;
    let app = router(state, &config);

    let listener = tokio::net::TcpListener::bind(&config.address)
        .await
        .map_err(AppError::Bind)?;
    info!(
        address = %config.address,
        origins = ?config.allowed_origins,
        "onboarding assistant API listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Builds the application router with CORS and request tracing.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/ask", post(ask))
        .route("/context", get(get_context).post(set_context))
        .route("/history", get(history))
        .with_state(Arc::new(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(config)),
        )
}

/// Explicit origin list. Credentials are allowed, so wildcards are never used.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.origin_headers()))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

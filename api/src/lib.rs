//! HTTP layer: thin request/response mapping onto the QA pipeline.

use std::{env, sync::Arc};

mod core;
mod error_handler;
mod routes;

pub use error_handler::{AppError, AppResult};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;

use crate::core::app_state::AppState;
use crate::routes::{
    chat::{chat_no_history_route::chat_no_history, chat_with_history_route::chat_with_history},
    health_route::health,
    retrieve::retrieve_route::retrieve,
    retrieve_compr::retrieve_compr_route::retrieve_compr,
    retrieve_compr_list::retrieve_compr_list_route::retrieve_compr_list,
    retrieve_list::retrieve_list_route::retrieve_list,
};

/// Validates configuration, builds shared state, and serves until Ctrl+C.
///
/// Missing required credentials fail here, before the listener binds.
pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env()?);

    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into());

    let app = Router::new()
        .route("/", get(health))
        .route("/retrieve", post(retrieve))
        .route("/retrieve-list", post(retrieve_list))
        .route("/retrieve-compr", post(retrieve_compr))
        .route("/retrieve-compr-list", post(retrieve_compr_list))
        .route("/chat-no-history", post(chat_no_history))
        .route("/chat-with-history", post(chat_with_history))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;

    tracing::info!(address = %host_url, "listening");

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

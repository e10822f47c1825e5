pub mod core;
pub mod error_handler;
mod routes;

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

use crate::{
    core::app_state::{AppConfig, AppState},
    error_handler::{AppError, AppResult},
    routes::{
        github_webhook::github_webhook_route::github_webhook_route,
        health::health_route::health_route,
    },
};

/// Builds the HTTP router around shared state.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/github/webhooks", post(github_webhook_route))
        .route("/health", get(health_route))
        .with_state(state)
}

/// Loads configuration from the environment and serves until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let cfg = AppConfig::from_env()?;
    let address = cfg.api_address.clone();
    let state = Arc::new(AppState::from_config(cfg)?);

    let listener = TcpListener::bind(&address).await.map_err(AppError::Bind)?;
    info!(address = %address, "listening for GitHub webhooks");

    serve(listener, state).await
}

/// Serves on an already bound listener. Shuts down gracefully on Ctrl+C.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> AppResult<()> {
    serve_with_shutdown(listener, state, shutdown_signal()).await
}

/// Serves until `signal` resolves, then waits for every event still being
/// handled in the background before returning.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    signal: F,
) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let tasks = state.tasks.clone();

    let served = axum::serve(listener, app(state))
        .with_graceful_shutdown(signal)
        .await
        .map_err(AppError::Server);

    tasks.close();
    if !tasks.is_empty() {
        info!(pending = tasks.len(), "waiting for in-flight events");
    }
    tasks.wait().await;

    served
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

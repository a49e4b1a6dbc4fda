//! Application builder and server entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

use filedesk_core::config::AppConfig;
use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::result::AppResult;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds.max(1));
    build_router(state).layer(TimeoutLayer::new(timeout))
}

/// Runs the FileDesk server until Ctrl-C.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    info!(
        provider = %config.storage.provider,
        data_root = %config.storage.data_root,
        "Starting FileDesk server"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::from_config(config)?;
    let store = Arc::clone(state.manager.store());

    let healthy = store.health_check().await?;
    if !healthy {
        tracing::warn!(provider = store.provider_type(), "Store health check failed");
    }

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Configuration, format!("Failed to bind {addr}"), e)
    })?;

    info!(address = %addr, "FileDesk server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    info!("FileDesk server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

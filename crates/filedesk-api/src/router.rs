//! Route definitions for the FileDesk HTTP API.
//!
//! All routes are mounted under `/file-manager`. The router receives
//! `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Prefix every route is nested under.
pub const API_PREFIX: &str = "/file-manager";

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(folder_routes())
        .merge(file_routes())
        .merge(search_routes())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_token,
        ))
        .merge(health_routes());

    Router::new()
        .nest(API_PREFIX, api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors::build_cors_layer(&state.config.server.cors))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Folder CRUD and tree navigation
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/contents", get(handlers::folder::list_contents))
        .route(
            "/folders",
            get(handlers::folder::list_folders).post(handlers::folder::create_folder),
        )
        .route(
            "/folders/{id}",
            get(handlers::folder::get_folder)
                .put(handlers::folder::rename_folder)
                .delete(handlers::folder::delete_folder),
        )
        .route("/folders/{id}/move", put(handlers::folder::move_folder))
}

/// File CRUD and upload
fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files",
            get(handlers::file::list_files).post(handlers::file::create_file),
        )
        .route("/files/bulk-delete", post(handlers::file::bulk_delete))
        .route(
            "/files/{id}",
            get(handlers::file::get_file)
                .put(handlers::file::rename_file)
                .delete(handlers::file::delete_file),
        )
        .route("/files/{id}/move", put(handlers::file::move_file))
        .route("/files/{id}/url", get(handlers::file::public_url))
        .route("/upload", post(handlers::upload::upload))
}

/// Search and statistics
fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(handlers::search::search))
        .route("/stats", get(handlers::search::stats))
}

/// Liveness, reachable without a token
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

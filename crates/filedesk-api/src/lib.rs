//! # filedesk-api
//!
//! HTTP API layer for FileDesk built on Axum.
//!
//! Every file-manager operation is exposed under `/file-manager`, with a
//! `{"success": true, "data": ...}` envelope on success and an
//! `{"error", "message", "details"}` body on failure. The same contract is
//! consumed by the remote backend in `filedesk-service`.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;

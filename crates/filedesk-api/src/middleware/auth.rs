//! Static bearer token check.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use tracing::warn;

use filedesk_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Rejects requests whose `Authorization: Bearer` token does not match
/// `server.api_token`. Does nothing when no token is configured.
pub async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(expected) = state.config.server.api_token.as_deref().filter(|t| !t.is_empty()) else {
        return next.run(request).await;
    };

    let presented = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string());

    match presented {
        Some(token) if token == expected => next.run(request).await,
        _ => {
            warn!(path = %request.uri().path(), "Rejected request with missing or invalid token");
            ApiError(AppError::unauthorized("Missing or invalid bearer token")).into_response()
        }
    }
}

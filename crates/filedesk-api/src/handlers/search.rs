//! Search and statistics handlers.

use axum::Json;
use axum::extract::{Query, State};

use filedesk_entity::{File, UsageStats};

use crate::dto::request::SearchQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /file-manager/search?q=
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<ApiResponse<Vec<File>>>> {
    let files = state.manager.search_by_name(query.q.as_deref()).await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// GET /file-manager/stats
pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<UsageStats>>> {
    let stats = state.manager.usage_stats().await?;
    Ok(Json(ApiResponse::ok(stats)))
}

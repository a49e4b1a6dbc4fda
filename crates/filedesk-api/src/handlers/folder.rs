//! Folder handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use filedesk_core::types::FolderId;
use filedesk_entity::root;
use filedesk_entity::{Folder, FolderContents};

use crate::dto::request::{
    CreateFolderRequest, FolderQuery, MoveFolderRequest, ParentQuery, RenameRequest,
};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /file-manager/contents?folder_id=
pub async fn list_contents(
    State(state): State<AppState>,
    Query(query): Query<FolderQuery>,
) -> ApiResult<Json<ApiResponse<FolderContents>>> {
    let folder = root::parse(query.folder_id.as_deref());
    let contents = state.manager.list_contents(folder.as_ref()).await?;
    Ok(Json(ApiResponse::ok(contents)))
}

/// GET /file-manager/folders?parent_id=
pub async fn list_folders(
    State(state): State<AppState>,
    Query(query): Query<ParentQuery>,
) -> ApiResult<Json<ApiResponse<Vec<Folder>>>> {
    let parent = root::parse(query.parent_id.as_deref());
    let folders = state.manager.list_subfolders(parent.as_ref()).await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// POST /file-manager/folders
pub async fn create_folder(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let folder = state
        .manager
        .create_folder(&req.name, req.parent_id.as_ref())
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// GET /file-manager/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    Path(id): Path<FolderId>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let folder = state.manager.get_folder(&id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PUT /file-manager/folders/{id}
pub async fn rename_folder(
    State(state): State<AppState>,
    Path(id): Path<FolderId>,
    ValidatedJson(req): ValidatedJson<RenameRequest>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let folder = state.manager.rename_folder(&id, &req.name).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PUT /file-manager/folders/{id}/move
pub async fn move_folder(
    State(state): State<AppState>,
    Path(id): Path<FolderId>,
    ValidatedJson(req): ValidatedJson<MoveFolderRequest>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let folder = state
        .manager
        .move_folder(&id, req.parent_id.as_ref())
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /file-manager/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<FolderId>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.manager.delete_folder(&id).await?;
    Ok(Json(ApiResponse::ok(())))
}

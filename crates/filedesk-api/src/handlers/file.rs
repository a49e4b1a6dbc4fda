//! File handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use filedesk_core::types::FileId;
use filedesk_entity::root;
use filedesk_entity::{BulkDeleteResult, CreateFile, File};

use crate::dto::request::{
    BulkDeleteRequest, CreateFileRequest, FolderQuery, MoveFileRequest, RenameRequest,
};
use crate::dto::response::{ApiResponse, UrlResponse};
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /file-manager/files?folder_id=
pub async fn list_files(
    State(state): State<AppState>,
    Query(query): Query<FolderQuery>,
) -> ApiResult<Json<ApiResponse<Vec<File>>>> {
    let folder = root::parse(query.folder_id.as_deref());
    let files = state.manager.list_files_in_folder(folder.as_ref()).await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// POST /file-manager/files
pub async fn create_file(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateFileRequest>,
) -> ApiResult<Json<ApiResponse<File>>> {
    let file = state
        .manager
        .create_file(CreateFile {
            name: req.name,
            mime_type: req.mime_type,
            size_bytes: req.size_bytes,
            folder_id: req.folder_id,
            dimensions: req.dimensions,
        })
        .await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// GET /file-manager/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
) -> ApiResult<Json<ApiResponse<File>>> {
    let file = state.manager.get_file(&id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// PUT /file-manager/files/{id}
pub async fn rename_file(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
    ValidatedJson(req): ValidatedJson<RenameRequest>,
) -> ApiResult<Json<ApiResponse<File>>> {
    let file = state.manager.rename_file(&id, &req.name).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// PUT /file-manager/files/{id}/move
pub async fn move_file(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
    ValidatedJson(req): ValidatedJson<MoveFileRequest>,
) -> ApiResult<Json<ApiResponse<File>>> {
    let file = state.manager.move_file(&id, req.folder_id.as_ref()).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// DELETE /file-manager/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.manager.delete_file(&id).await?;
    Ok(Json(ApiResponse::ok(())))
}

/// POST /file-manager/files/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<BulkDeleteRequest>,
) -> ApiResult<Json<ApiResponse<BulkDeleteResult>>> {
    let result = state.manager.delete_files(&req.ids).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /file-manager/files/{id}/url
pub async fn public_url(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
) -> ApiResult<Json<ApiResponse<UrlResponse>>> {
    let url = state.manager.get_public_url(&id).await?;
    Ok(Json(ApiResponse::ok(UrlResponse { url })))
}

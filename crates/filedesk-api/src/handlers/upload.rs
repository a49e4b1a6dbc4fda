//! Multipart upload handler.

use axum::Json;
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use bytes::Bytes;

use filedesk_core::error::AppError;
use filedesk_core::types::FolderId;
use filedesk_entity::root;
use filedesk_entity::{CreateFile, Dimensions, File};
use filedesk_service::upload::probe_dimensions;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /file-manager/upload
///
/// Fields: `file` (required, with a file name), `folder_id`, and optional
/// `width`/`height`. Only metadata is recorded; the size is the received
/// byte count.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ApiResponse<File>>> {
    let mut folder_id: Option<FolderId> = None;
    let mut file_name: Option<String> = None;
    let mut mime_type: Option<String> = None;
    let mut data: Option<Bytes> = None;
    let mut width: Option<u32> = None;
    let mut height: Option<u32> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Multipart error", e))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "folder_id" => {
                let text = read_text(field).await?;
                folder_id = root::parse(Some(text.trim()));
            }
            "width" => width = Some(parse_dimension("width", &read_text(field).await?)?),
            "height" => height = Some(parse_dimension("height", &read_text(field).await?)?),
            "file" => {
                file_name = field.file_name().map(String::from);
                mime_type = field.content_type().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| multipart_error("Read error", e))?,
                );
            }
            _ => {}
        }
    }

    let file_name = file_name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::validation("file with a file name is required"))?;
    let data = data.ok_or_else(|| AppError::validation("file data is required"))?;
    let mime_type = mime_type.unwrap_or_else(|| {
        mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string()
    });

    let dimensions = match (width, height) {
        (Some(width), Some(height)) => Some(Dimensions { width, height }),
        _ if mime_type.starts_with("image/") => probe_dimensions(&data),
        _ => None,
    };

    let file = state
        .manager
        .create_file(CreateFile {
            name: file_name,
            mime_type,
            size_bytes: data.len() as u64,
            folder_id,
            dimensions,
        })
        .await?;

    Ok(Json(ApiResponse::ok(file)))
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| multipart_error("Read error", e))
}

/// Keep the body-limit status; every other multipart failure is bad input.
fn multipart_error(context: &str, e: MultipartError) -> AppError {
    let message = format!("{context}: {}", e.body_text());
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large(message)
    } else {
        AppError::validation(message)
    }
}

fn parse_dimension(name: &str, raw: &str) -> Result<u32, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid {name}: '{raw}'")))
}

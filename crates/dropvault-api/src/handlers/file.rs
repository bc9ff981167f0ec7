//! Multipart upload and listing handlers.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use bytes::Bytes;

use dropvault_core::error::AppError;
use dropvault_service::SimpleUploadParams;

use crate::dto::request::{ListFilesQuery, parse_parent_id};
use crate::dto::response::NodeResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Uploaded part of a multipart form.
struct FilePart {
    file_name: String,
    content_type: Option<String>,
    data: Bytes,
}

fn multipart_error(state: &AppState, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        let limit_mb = state.upload_service.policy().max_file_size_bytes() / (1024 * 1024);
        AppError::validation(format!("File exceeds maximum size of {limit_mb} MB"))
    } else {
        AppError::validation(format!("Malformed multipart body: {}", err.body_text()))
    }
}

/// POST /api/files/upload
///
/// Form fields: `file`, `parentId` (optional), `userId` (optional).
pub async fn simple_upload(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<NodeResponse>, ApiError> {
    let mut file: Option<FilePart> = None;
    let mut parent_id: Option<String> = None;
    let mut asserted_user_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&state, e))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(String::from);
                let data = field.bytes().await.map_err(|e| multipart_error(&state, e))?;
                file = Some(FilePart {
                    file_name,
                    content_type,
                    data,
                });
            }
            "parentId" => {
                parent_id = Some(field.text().await.map_err(|e| multipart_error(&state, e))?);
            }
            "userId" => {
                asserted_user_id =
                    Some(field.text().await.map_err(|e| multipart_error(&state, e))?);
            }
            _ => {}
        }
    }

    auth.ensure_asserted_user(asserted_user_id.as_deref())?;
    let file = file.ok_or_else(|| AppError::validation("No file uploaded"))?;
    let parent_id = parse_parent_id(parent_id.as_deref())?;

    let node = state
        .upload_service
        .simple_upload(
            &auth,
            SimpleUploadParams {
                file_name: file.file_name,
                content_type: file.content_type,
                data: file.data,
                parent_id,
                asserted_user_id,
            },
        )
        .await?;

    Ok(Json(NodeResponse::from(node)))
}

/// GET /api/files?parentId=...
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<Vec<NodeResponse>>, ApiError> {
    let parent_id = parse_parent_id(query.parent_id.as_deref())?;

    let nodes = state.folder_service.list_contents(&auth, parent_id).await?;

    Ok(Json(nodes.into_iter().map(NodeResponse::from).collect()))
}

//! Folder handlers.

use axum::Json;
use axum::extract::State;

use dropvault_service::CreateFolderParams;

use crate::dto::request::{CreateFolderRequest, parse_parent_id};
use crate::dto::response::NodeResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/folder/create
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<Json<NodeResponse>, ApiError> {
    auth.ensure_asserted_user(req.user_id.as_deref())?;
    let parent_id = parse_parent_id(req.parent_id.as_deref())?;

    let folder = state
        .folder_service
        .create_folder(
            &auth,
            CreateFolderParams {
                name: req.name,
                parent_id,
                asserted_user_id: req.user_id,
            },
        )
        .await?;

    Ok(Json(NodeResponse::from(folder)))
}

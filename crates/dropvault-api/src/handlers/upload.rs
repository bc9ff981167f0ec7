//! Direct-to-provider upload handlers.

use axum::Json;
use axum::extract::State;

use dropvault_core::error::AppError;
use dropvault_service::RegisterUploadParams;
use dropvault_storage::UploadCredentials;

use crate::dto::request::{RegisterUploadRequest, parse_parent_id};
use crate::dto::response::NodeResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/upload
///
/// Records a file the client already sent to the storage provider.
pub async fn register_upload(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<RegisterUploadRequest>,
) -> Result<Json<NodeResponse>, ApiError> {
    auth.ensure_asserted_user(req.user_id.as_deref())?;
    let parent_id = parse_parent_id(req.parent_id.as_deref())?;

    let node = state
        .upload_service
        .register_upload(
            &auth,
            RegisterUploadParams {
                upload: req.upload.into(),
                parent_id,
                asserted_user_id: req.user_id,
            },
        )
        .await?;

    Ok(Json(NodeResponse::from(node)))
}

/// GET /api/upload/auth
///
/// Short-lived credentials for a direct upload to the provider.
pub async fn upload_auth(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UploadCredentials>, ApiError> {
    let signer = state
        .upload_signer
        .as_ref()
        .ok_or_else(|| AppError::configuration("Direct uploads are not configured"))?;

    let credentials = signer.issue()?;
    tracing::debug!(user_id = %auth.user_id, expire = credentials.expire, "Issued upload credentials");

    Ok(Json(credentials))
}

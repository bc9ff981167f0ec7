//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use dropvault_core::error::AppError;
use dropvault_core::result::AppResult;
use dropvault_core::types::NodeId;
use dropvault_service::UploadedObject;

/// Parse an optional folder id sent by a client. Blank means root.
pub fn parse_parent_id(raw: Option<&str>) -> AppResult<Option<NodeId>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse::<NodeId>()
            .map(Some)
            .map_err(|_| AppError::validation("Invalid parentId")),
    }
}

/// Create folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Folder name; length is checked after trimming.
    #[serde(default)]
    pub name: String,
    /// Parent folder (`null` for root-level).
    #[serde(default)]
    pub parent_id: Option<String>,
    /// User id the client believes it is acting as.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// What the provider returned to a client that uploaded directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadedObjectRequest {
    /// Original file name.
    #[validate(length(max = 1024))]
    pub name: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Provider storage path.
    pub file_path: Option<String>,
    /// Provider URL.
    pub url: Option<String>,
    /// Provider file category (`image`, `non-image`).
    pub file_type: Option<String>,
    /// MIME type.
    pub mime: Option<String>,
    /// Thumbnail URL.
    pub thumbnail_url: Option<String>,
}

impl From<UploadedObjectRequest> for UploadedObject {
    fn from(req: UploadedObjectRequest) -> Self {
        Self {
            name: req.name,
            size: req.size,
            file_path: req.file_path,
            url: req.url,
            file_type: req.file_type,
            mime: req.mime,
            thumbnail_url: req.thumbnail_url,
        }
    }
}

/// Upload registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUploadRequest {
    /// Provider response; `imagekit` is accepted as the key too.
    #[serde(default, alias = "imagekit")]
    #[validate(nested)]
    pub upload: UploadedObjectRequest,
    /// Target folder (`null` for root-level).
    #[serde(default)]
    pub parent_id: Option<String>,
    /// User id the client believes it is acting as.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Query string of `GET /api/files`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesQuery {
    /// Folder to list; absent or blank lists the root.
    pub parent_id: Option<String>,
}

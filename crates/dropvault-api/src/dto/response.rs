//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dropvault_entity::node::Node;

/// A file or folder as clients see it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeResponse {
    /// Node id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Folder path, or provider storage path for files.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type or `"folder"`.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Provider URL.
    pub file_url: Option<String>,
    /// Provider thumbnail URL.
    pub thumbnail_url: Option<String>,
    /// Owner.
    pub user_id: String,
    /// Containing folder.
    pub parent_id: Option<String>,
    /// Whether this is a folder.
    pub is_folder: bool,
    /// Starred flag.
    pub is_starred: bool,
    /// Trash flag.
    pub is_trash: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<Node> for NodeResponse {
    fn from(node: Node) -> Self {
        Self {
            id: node.id.to_string(),
            size: node.kind.size(),
            node_type: node.kind.type_name().to_string(),
            file_url: node.kind.file_url().map(str::to_string),
            thumbnail_url: node.kind.thumbnail_url().map(str::to_string),
            is_folder: node.is_folder(),
            name: node.name,
            path: node.path,
            user_id: node.user_id.into_inner(),
            parent_id: node.parent_id.map(|id| id.to_string()),
            is_starred: node.is_starred,
            is_trash: node.is_trash,
            created_at: node.created_at,
            updated_at: node.updated_at,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Node store backend and reachability.
    pub node_store: ComponentHealth,
    /// Blob store provider and reachability.
    pub blob_store: ComponentHealth,
}

/// Health of one dependency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Backend or provider name.
    pub name: String,
    /// Whether the last probe succeeded.
    pub healthy: bool,
}

//! Node entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use dropvault_core::error::AppError;
use dropvault_core::types::{NodeId, UserId};

/// Value of the `type` column for every folder row.
pub const FOLDER_TYPE: &str = "folder";

/// `type` recorded for a file whose MIME type is unknown.
pub const FALLBACK_FILE_TYPE: &str = "file";

/// A row of the `files` table, exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct NodeRow {
    /// Unique node identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Materialized folder path, or provider storage path for files.
    pub path: String,
    /// Size in bytes (0 for folders).
    pub size: i64,
    /// MIME type, or `"folder"`.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub node_type: String,
    /// Provider URL (files only).
    pub file_url: Option<String>,
    /// Provider thumbnail URL (files only).
    pub thumbnail_url: Option<String>,
    /// Owner.
    pub user_id: String,
    /// Containing folder (null at root).
    pub parent_id: Option<Uuid>,
    /// Variant discriminator.
    pub is_folder: bool,
    /// Starred flag.
    pub is_starred: bool,
    /// Trash flag.
    pub is_trash: bool,
    /// When the node was inserted.
    pub created_at: DateTime<Utc>,
    /// When the node was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Variant-specific data of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A folder. Carries no payload: size 0, no URLs, type `"folder"`.
    Folder,
    /// A stored file.
    File {
        /// Size in bytes.
        size: u64,
        /// MIME type or [`FALLBACK_FILE_TYPE`].
        mime_type: String,
        /// Provider URL.
        file_url: String,
        /// Provider thumbnail URL, if one was rendered.
        thumbnail_url: Option<String>,
    },
}

impl NodeKind {
    /// Whether this is the folder variant.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder)
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        match self {
            Self::Folder => 0,
            Self::File { size, .. } => *size,
        }
    }

    /// Value of the `type` column.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Folder => FOLDER_TYPE,
            Self::File { mime_type, .. } => mime_type,
        }
    }

    /// Provider URL, `None` for folders.
    pub fn file_url(&self) -> Option<&str> {
        match self {
            Self::Folder => None,
            Self::File { file_url, .. } => Some(file_url),
        }
    }

    /// Thumbnail URL, `None` for folders.
    pub fn thumbnail_url(&self) -> Option<&str> {
        match self {
            Self::Folder => None,
            Self::File { thumbnail_url, .. } => thumbnail_url.as_deref(),
        }
    }
}

/// A file or folder owned by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Unique node identifier.
    pub id: NodeId,
    /// Display name.
    pub name: String,
    /// Materialized folder path, or provider storage path for files.
    pub path: String,
    /// Owner.
    pub user_id: UserId,
    /// Containing folder (`None` at root).
    pub parent_id: Option<NodeId>,
    /// Starred flag.
    pub is_starred: bool,
    /// Trash flag.
    pub is_trash: bool,
    /// When the node was inserted.
    pub created_at: DateTime<Utc>,
    /// When the node was last updated.
    pub updated_at: DateTime<Utc>,
    /// Variant data.
    pub kind: NodeKind,
}

impl Node {
    /// Whether this node is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Whether this node sits at the owner's root.
    pub fn is_root_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl TryFrom<NodeRow> for Node {
    type Error = AppError;

    fn try_from(row: NodeRow) -> Result<Self, Self::Error> {
        let corrupt =
            |reason: &str| AppError::database(format!("Corrupt node row {}: {reason}", row.id));

        let user_id = UserId::parse(&row.user_id).ok_or_else(|| corrupt("empty user_id"))?;

        let kind = if row.is_folder {
            if row.file_url.is_some() || row.thumbnail_url.is_some() {
                return Err(corrupt("folder carries a URL"));
            }
            if row.size != 0 {
                return Err(corrupt("folder has non-zero size"));
            }
            if row.node_type != FOLDER_TYPE {
                return Err(corrupt("folder type is not 'folder'"));
            }
            NodeKind::Folder
        } else {
            let size = u64::try_from(row.size).map_err(|_| corrupt("negative size"))?;
            let file_url = row
                .file_url
                .clone()
                .ok_or_else(|| corrupt("file without file_url"))?;
            NodeKind::File {
                size,
                mime_type: row.node_type.clone(),
                file_url,
                thumbnail_url: row.thumbnail_url.clone(),
            }
        };

        Ok(Self {
            id: NodeId::from_uuid(row.id),
            name: row.name,
            path: row.path,
            user_id,
            parent_id: row.parent_id.map(NodeId::from_uuid),
            is_starred: row.is_starred,
            is_trash: row.is_trash,
            created_at: row.created_at,
            updated_at: row.updated_at,
            kind,
        })
    }
}

/// Data required to insert a new node.
///
/// The id is minted here; timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNode {
    /// Identifier the node will be stored under.
    pub id: NodeId,
    /// Display name.
    pub name: String,
    /// Materialized folder path, or provider storage path for files.
    pub path: String,
    /// Owner.
    pub user_id: UserId,
    /// Containing folder (`None` at root).
    pub parent_id: Option<NodeId>,
    /// Variant data.
    pub kind: NodeKind,
}

impl NewNode {
    /// A folder record.
    pub fn folder(
        user_id: UserId,
        parent_id: Option<NodeId>,
        name: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            path: path.into(),
            user_id,
            parent_id,
            kind: NodeKind::Folder,
        }
    }

    /// A file record.
    pub fn file(
        user_id: UserId,
        parent_id: Option<NodeId>,
        name: impl Into<String>,
        path: impl Into<String>,
        kind: NodeKind,
    ) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            path: path.into(),
            user_id,
            parent_id,
            kind,
        }
    }

    /// Materialize the record with store-assigned timestamps.
    pub fn into_node(self, now: DateTime<Utc>) -> Node {
        Node {
            id: self.id,
            name: self.name,
            path: self.path,
            user_id: self.user_id,
            parent_id: self.parent_id,
            is_starred: false,
            is_trash: false,
            created_at: now,
            updated_at: now,
            kind: self.kind,
        }
    }
}

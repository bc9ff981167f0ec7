//! Folder creation and folder listing.

use std::sync::Arc;

use tracing::info;

use dropvault_core::error::AppError;
use dropvault_core::result::AppResult;
use dropvault_core::types::NodeId;
use dropvault_database::NodeStore;
use dropvault_entity::node::{NewNode, Node};

use crate::context::RequestContext;
use crate::folder::resolver::ParentResolver;
use crate::timeout::{ServiceTimeouts, bounded};

/// Longest folder name accepted, in characters, after trimming.
pub const MAX_FOLDER_NAME_CHARS: usize = 255;

/// Parameters for creating a folder.
#[derive(Debug, Clone)]
pub struct CreateFolderParams {
    /// Requested name; surrounding whitespace is dropped.
    pub name: String,
    /// Target parent (`None` for root-level).
    pub parent_id: Option<NodeId>,
    /// User id the client claims to act as, if it sent one.
    pub asserted_user_id: Option<String>,
}

/// Creates folders and lists folder contents.
#[derive(Debug, Clone)]
pub struct FolderService {
    store: Arc<dyn NodeStore>,
    resolver: ParentResolver,
    timeouts: ServiceTimeouts,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(store: Arc<dyn NodeStore>, timeouts: ServiceTimeouts) -> Self {
        Self {
            resolver: ParentResolver::new(Arc::clone(&store), timeouts.store),
            store,
            timeouts,
        }
    }

    /// Create a folder under the requested parent.
    ///
    /// Folder names are not unique: repeating a request creates a sibling
    /// with the same name and path.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        params: CreateFolderParams,
    ) -> AppResult<Node> {
        ctx.ensure_asserted_user(params.asserted_user_id.as_deref())?;

        let name = params.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name is required"));
        }
        if name.chars().count() > MAX_FOLDER_NAME_CHARS {
            return Err(AppError::validation("Folder name is too long"));
        }

        let parent = self.resolver.resolve(ctx, params.parent_id).await?;
        let record = NewNode::folder(
            ctx.user_id.clone(),
            parent.id(),
            name,
            parent.child_path(name),
        );

        let folder = bounded("node store", self.timeouts.store, self.store.insert(record)).await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            path = %folder.path,
            "Folder created"
        );

        Ok(folder)
    }

    /// Direct children of `parent_id` (root when `None`) owned by the caller.
    ///
    /// An id that is not one of the caller's folders yields an empty list.
    pub async fn list_contents(
        &self,
        ctx: &RequestContext,
        parent_id: Option<NodeId>,
    ) -> AppResult<Vec<Node>> {
        bounded(
            "node store",
            self.timeouts.store,
            self.store.list_children(&ctx.user_id, parent_id),
        )
        .await
    }
}

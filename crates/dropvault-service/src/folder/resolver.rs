//! Resolution of a requested parent folder against the caller's tree.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use dropvault_core::error::AppError;
use dropvault_core::result::AppResult;
use dropvault_core::types::NodeId;
use dropvault_database::NodeStore;

use crate::context::RequestContext;
use crate::timeout::bounded;

/// The folder a new node will be created in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentRef {
    /// The caller's root.
    Root,
    /// One of the caller's folders.
    Folder {
        /// Folder id.
        id: NodeId,
        /// Materialized folder path.
        path: String,
    },
}

impl ParentRef {
    /// Parent id to store on the child, `None` at root.
    pub fn id(&self) -> Option<NodeId> {
        match self {
            Self::Root => None,
            Self::Folder { id, .. } => Some(*id),
        }
    }

    /// Materialized path of a child folder named `name`.
    pub fn child_path(&self, name: &str) -> String {
        match self {
            Self::Root => format!("/{name}"),
            Self::Folder { path, .. } => format!("{path}/{name}"),
        }
    }
}

/// Looks up requested parents, scoped to the caller.
#[derive(Debug, Clone)]
pub struct ParentResolver {
    store: Arc<dyn NodeStore>,
    timeout: Duration,
}

impl ParentResolver {
    /// Creates a resolver over `store`.
    pub fn new(store: Arc<dyn NodeStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Resolve `requested` for the caller.
    ///
    /// `None` is the root and always succeeds. An id that is missing, not
    /// a folder, or owned by someone else fails with the same
    /// parent-not-found error.
    pub async fn resolve(
        &self,
        ctx: &RequestContext,
        requested: Option<NodeId>,
    ) -> AppResult<ParentRef> {
        let Some(id) = requested else {
            return Ok(ParentRef::Root);
        };

        let folder = bounded(
            "node store",
            self.timeout,
            self.store.find_folder(&ctx.user_id, id),
        )
        .await?;

        match folder {
            Some(folder) => Ok(ParentRef::Folder {
                id: folder.id,
                path: folder.path,
            }),
            None => {
                debug!(user_id = %ctx.user_id, parent_id = %id, "Parent folder not usable");
                Err(AppError::parent_not_found())
            }
        }
    }
}

//! Node repositories.

pub mod memory;
pub mod node;

use async_trait::async_trait;

use dropvault_core::result::AppResult;
use dropvault_core::types::{NodeId, UserId};
use dropvault_entity::node::{NewNode, Node};

pub use memory::MemoryNodeRepository;
pub use node::PgNodeRepository;

/// Persistence for file and folder nodes.
///
/// Every read is scoped to an owner. Implementations must keep
/// [`NodeStore::insert`] atomic with respect to its parent check.
#[async_trait]
pub trait NodeStore: Send + Sync + std::fmt::Debug + 'static {
    /// Backend name (e.g., "postgres", "memory").
    fn backend(&self) -> &str;

    /// Check whether the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Find a folder by id, visible only to its owner.
    async fn find_folder(&self, user_id: &UserId, id: NodeId) -> AppResult<Option<Node>>;

    /// Insert a node.
    ///
    /// When `node.parent_id` is set, the parent is re-verified in the same
    /// atomic step: it must exist, be a folder, and belong to
    /// `node.user_id`. Otherwise the insert fails with
    /// [`AppError::parent_not_found`](dropvault_core::AppError::parent_not_found).
    async fn insert(&self, node: NewNode) -> AppResult<Node>;

    /// Direct children of `parent_id` (root when `None`) owned by `user_id`,
    /// folders first, then by name, creation time and id.
    async fn list_children(
        &self,
        user_id: &UserId,
        parent_id: Option<NodeId>,
    ) -> AppResult<Vec<Node>>;
}

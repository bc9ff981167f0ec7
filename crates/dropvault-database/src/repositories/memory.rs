//! Process-local node repository.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use dropvault_core::error::AppError;
use dropvault_core::result::AppResult;
use dropvault_core::types::{NodeId, UserId};
use dropvault_entity::node::{NewNode, Node};

use super::NodeStore;

/// Node store backed by a map behind a single lock.
///
/// The parent check and the insert happen under one write guard, so a
/// concurrent request can never observe the gap between them.
#[derive(Debug, Clone, Default)]
pub struct MemoryNodeRepository {
    nodes: Arc<RwLock<HashMap<NodeId, Node>>>,
}

impl MemoryNodeRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored nodes across all users.
    pub async fn len(&self) -> usize {
        self.nodes.read().await.len()
    }

    /// Whether the store holds no nodes.
    pub async fn is_empty(&self) -> bool {
        self.nodes.read().await.is_empty()
    }
}

/// Listing order: folders first, then name, creation time, id.
fn listing_order(a: &Node, b: &Node) -> Ordering {
    b.is_folder()
        .cmp(&a.is_folder())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

fn is_folder_of(node: &Node, user_id: &UserId) -> bool {
    node.is_folder() && &node.user_id == user_id
}

#[async_trait]
impl NodeStore for MemoryNodeRepository {
    fn backend(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn find_folder(&self, user_id: &UserId, id: NodeId) -> AppResult<Option<Node>> {
        let nodes = self.nodes.read().await;
        Ok(nodes
            .get(&id)
            .filter(|node| is_folder_of(node, user_id))
            .cloned())
    }

    async fn insert(&self, node: NewNode) -> AppResult<Node> {
        let mut nodes = self.nodes.write().await;

        if let Some(parent_id) = node.parent_id {
            let parent_ok = nodes
                .get(&parent_id)
                .is_some_and(|parent| is_folder_of(parent, &node.user_id));
            if !parent_ok {
                return Err(AppError::parent_not_found());
            }
        }

        if nodes.contains_key(&node.id) {
            return Err(AppError::database(format!("Duplicate node id {}", node.id)));
        }

        let node = node.into_node(Utc::now());
        debug!(node_id = %node.id, user_id = %node.user_id, "Inserted node");
        nodes.insert(node.id, node.clone());
        Ok(node)
    }

    async fn list_children(
        &self,
        user_id: &UserId,
        parent_id: Option<NodeId>,
    ) -> AppResult<Vec<Node>> {
        let nodes = self.nodes.read().await;
        let mut children: Vec<Node> = nodes
            .values()
            .filter(|node| &node.user_id == user_id && node.parent_id == parent_id)
            .cloned()
            .collect();
        children.sort_by(listing_order);
        Ok(children)
    }
}

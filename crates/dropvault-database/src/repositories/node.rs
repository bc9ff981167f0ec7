//! PostgreSQL node repository.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use dropvault_core::error::{AppError, ErrorKind};
use dropvault_core::result::AppResult;
use dropvault_core::types::{NodeId, UserId};
use dropvault_entity::node::{NewNode, Node, NodeRow};

use super::NodeStore;

const NODE_COLUMNS: &str = "id, name, path, size, type, file_url, thumbnail_url, user_id, \
     parent_id, is_folder, is_starred, is_trash, created_at, updated_at";

/// Constraint violated when a parent disappears or changes hands between
/// the existence check and the insert.
const PARENT_FKEY: &str = "files_parent_fkey";

/// Repository for the `files` table.
#[derive(Debug, Clone)]
pub struct PgNodeRepository {
    pool: PgPool,
}

impl PgNodeRepository {
    /// Create a new node repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn to_nodes(rows: Vec<NodeRow>) -> AppResult<Vec<Node>> {
        rows.into_iter().map(Node::try_from).collect()
    }
}

#[async_trait]
impl NodeStore for PgNodeRepository {
    fn backend(&self) -> &str {
        "postgres"
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    async fn find_folder(&self, user_id: &UserId, id: NodeId) -> AppResult<Option<Node>> {
        let sql =
            format!("SELECT {NODE_COLUMNS} FROM files WHERE id = $1 AND user_id = $2 AND is_folder");
        let row = sqlx::query_as::<_, NodeRow>(&sql)
            .bind(id.into_uuid())
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))?;

        row.map(Node::try_from).transpose()
    }

    async fn insert(&self, node: NewNode) -> AppResult<Node> {
        let size = i64::try_from(node.kind.size())
            .map_err(|_| AppError::validation("File size out of range"))?;

        // The parent check and the insert are one statement; the composite
        // foreign key covers a parent removed after the EXISTS probe.
        let sql = format!(
            "INSERT INTO files (id, name, path, size, type, file_url, thumbnail_url, \
                                user_id, parent_id, is_folder, is_starred, is_trash) \
             SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, FALSE, FALSE \
             WHERE $9::uuid IS NULL OR EXISTS ( \
                 SELECT 1 FROM files p WHERE p.id = $9 AND p.user_id = $8 AND p.is_folder \
             ) \
             RETURNING {NODE_COLUMNS}"
        );

        let row = sqlx::query_as::<_, NodeRow>(&sql)
            .bind(node.id.into_uuid())
            .bind(&node.name)
            .bind(&node.path)
            .bind(size)
            .bind(node.kind.type_name())
            .bind(node.kind.file_url())
            .bind(node.kind.thumbnail_url())
            .bind(node.user_id.as_str())
            .bind(node.parent_id.map(NodeId::into_uuid))
            .bind(node.kind.is_folder())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                let parent_gone = matches!(
                    &e,
                    sqlx::Error::Database(db) if db.constraint() == Some(PARENT_FKEY)
                );
                if parent_gone {
                    AppError::parent_not_found()
                } else {
                    AppError::with_source(ErrorKind::Database, "Failed to insert node", e)
                }
            })?;

        let Some(row) = row else {
            debug!(
                user_id = %node.user_id,
                parent_id = ?node.parent_id,
                "Insert skipped: parent is not a folder of this user"
            );
            return Err(AppError::parent_not_found());
        };

        Node::try_from(row)
    }

    async fn list_children(
        &self,
        user_id: &UserId,
        parent_id: Option<NodeId>,
    ) -> AppResult<Vec<Node>> {
        let sql = format!(
            "SELECT {NODE_COLUMNS} FROM files \
             WHERE user_id = $1 AND parent_id IS NOT DISTINCT FROM $2 \
             ORDER BY is_folder DESC, name COLLATE \"C\" ASC, created_at ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, NodeRow>(&sql)
            .bind(user_id.as_str())
            .bind(parent_id.map(NodeId::into_uuid))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list nodes", e))?;

        Self::to_nodes(rows)
    }
}

//! Node store selection.

use std::sync::Arc;

use tracing::info;

use dropvault_core::config::{DatabaseBackend, DatabaseConfig};
use dropvault_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::migration::run_migrations;
use crate::repositories::{MemoryNodeRepository, NodeStore, PgNodeRepository};

/// Build the node store selected by `database.backend`.
///
/// For PostgreSQL this connects the pool and, unless disabled, applies
/// pending migrations.
pub async fn open_node_store(config: &DatabaseConfig) -> AppResult<Arc<dyn NodeStore>> {
    match config.backend {
        DatabaseBackend::Postgres => {
            let pool = DatabasePool::connect(config).await?;
            if config.run_migrations {
                run_migrations(pool.pool()).await?;
            }
            Ok(Arc::new(PgNodeRepository::new(pool.pool().clone())))
        }
        DatabaseBackend::Memory => {
            info!("Using in-memory node store; data is lost on restart");
            Ok(Arc::new(MemoryNodeRepository::new()))
        }
    }
}

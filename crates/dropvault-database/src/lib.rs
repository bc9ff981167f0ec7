//! # dropvault-database
//!
//! The [`NodeStore`] abstraction over the `files` table, with a
//! PostgreSQL implementation and a process-local one, plus connection
//! and migration management.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use repositories::NodeStore;
pub use store::open_node_store;

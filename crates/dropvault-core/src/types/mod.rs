//! Core type definitions used across the DropVault workspace.

pub mod id;

pub use id::{NodeId, UserId};

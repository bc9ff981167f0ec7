//! # dropvault-entity
//!
//! Domain entity models for DropVault. A single table holds both files
//! and folders; [`node::NodeRow`] mirrors that table and converts into the
//! typed [`node::Node`], whose [`node::NodeKind`] carries the variant data.

pub mod node;

pub use node::{NewNode, Node, NodeKind, NodeRow};

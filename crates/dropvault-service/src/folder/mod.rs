//! Folder resolution, creation and listing.

pub mod resolver;
pub mod service;

pub use resolver::{ParentRef, ParentResolver};
pub use service::{CreateFolderParams, FolderService};

//! # dropvault-service
//!
//! Business logic service layer for DropVault. Services validate the
//! caller and the target folder against the node store before any call
//! to the blob store, then record the resulting node.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod file;
pub mod folder;
pub mod timeout;

#[cfg(test)]
mod testing;

pub use context::RequestContext;
pub use file::{
    RegisterUploadParams, SimpleUploadParams, UploadPolicy, UploadService, UploadedObject,
};
pub use folder::{CreateFolderParams, FolderService, ParentRef, ParentResolver};
pub use timeout::ServiceTimeouts;

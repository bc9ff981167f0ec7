//! Core traits defined in `dropvault-core` and implemented by other crates.

pub mod identity;
pub mod storage;

pub use identity::IdentityResolver;
pub use storage::{BlobStore, BlobUpload, StoredBlob};

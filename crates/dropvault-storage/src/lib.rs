//! # dropvault-storage
//!
//! Blob store implementations for DropVault: a local filesystem store for
//! development and an ImageKit store for production. Also hosts the
//! provider folder layout and the signer for direct-upload credentials.

pub mod layout;
pub mod manager;
pub mod providers;
pub mod signer;

pub use layout::StorageLayout;
pub use manager::build_blob_store;
pub use signer::{UploadCredentials, UploadSigner};

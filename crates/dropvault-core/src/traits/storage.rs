//! Blob store trait for pluggable upload backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// A file handed to the blob store.
#[derive(Debug, Clone)]
pub struct BlobUpload {
    /// File contents.
    pub data: Bytes,
    /// Name to store the object under, unique within `folder`.
    pub file_name: String,
    /// Provider folder, e.g. `/dropvault/user_2abc/root`.
    pub folder: String,
    /// Content type declared by the client, if any.
    pub content_type: Option<String>,
}

/// What the provider reports back after a successful store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredBlob {
    /// Public URL of the stored object. `None` means the provider did not
    /// return a usable location.
    pub url: Option<String>,
    /// Provider-side path of the stored object.
    pub path: Option<String>,
    /// Size in bytes as recorded by the provider.
    pub size: u64,
    /// MIME type detected by the provider.
    pub mime_type: Option<String>,
    /// Thumbnail URL, for providers that render previews.
    pub thumbnail_url: Option<String>,
}

/// Trait for blob storage backends.
///
/// Implementations live in `dropvault-storage`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "imagekit").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store the bytes and return the provider's view of the object.
    async fn store(&self, upload: BlobUpload) -> AppResult<StoredBlob>;
}

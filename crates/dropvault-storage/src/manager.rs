//! Blob store selection.

use std::sync::Arc;

use tracing::info;

use dropvault_core::config::{StorageConfig, StorageProviderKind};
use dropvault_core::result::AppResult;
use dropvault_core::traits::storage::BlobStore;

/// Build the blob store selected by `storage.provider`.
pub async fn build_blob_store(config: &StorageConfig) -> AppResult<Arc<dyn BlobStore>> {
    let store: Arc<dyn BlobStore> = match config.provider {
        StorageProviderKind::Local => local(config).await?,
        StorageProviderKind::ImageKit => imagekit(config)?,
    };

    info!(provider = store.provider_type(), "Blob store initialized");
    Ok(store)
}

#[cfg(feature = "local")]
async fn local(config: &StorageConfig) -> AppResult<Arc<dyn BlobStore>> {
    use crate::providers::LocalBlobStore;

    Ok(Arc::new(LocalBlobStore::new(&config.local).await?))
}

#[cfg(not(feature = "local"))]
async fn local(_config: &StorageConfig) -> AppResult<Arc<dyn BlobStore>> {
    Err(dropvault_core::AppError::configuration(
        "Local storage support is not compiled in",
    ))
}

#[cfg(feature = "imagekit")]
fn imagekit(config: &StorageConfig) -> AppResult<Arc<dyn BlobStore>> {
    use std::time::Duration;

    use crate::providers::ImageKitBlobStore;

    Ok(Arc::new(ImageKitBlobStore::new(
        &config.imagekit,
        Duration::from_secs(config.timeout_seconds),
    )?))
}

#[cfg(not(feature = "imagekit"))]
fn imagekit(_config: &StorageConfig) -> AppResult<Arc<dyn BlobStore>> {
    Err(dropvault_core::AppError::configuration(
        "ImageKit support is not compiled in",
    ))
}

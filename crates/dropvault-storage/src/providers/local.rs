//! Local filesystem blob store.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use dropvault_core::config::LocalStorageConfig;
use dropvault_core::error::{AppError, ErrorKind};
use dropvault_core::result::AppResult;
use dropvault_core::traits::storage::{BlobStore, BlobUpload, StoredBlob};

/// Stores blobs under a root directory and reports URLs below a public
/// base URL.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Root directory for all stored files.
    root: PathBuf,
    /// URL prefix the root directory is served under.
    public_base_url: String,
}

impl LocalBlobStore {
    /// Create a new local blob store, creating the root directory if needed.
    pub async fn new(config: &LocalStorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a provider path to a location inside the root.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(AppError::validation(format!("Invalid storage path: {path}")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.is_dir())
    }

    async fn store(&self, upload: BlobUpload) -> AppResult<StoredBlob> {
        let path = format!(
            "{}/{}",
            upload.folder.trim_end_matches('/'),
            upload.file_name
        );
        let full_path = self.resolve(&path)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        fs::write(&full_path, &upload.data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {path}"),
                e,
            )
        })?;

        let mime_type = upload.content_type.clone().or_else(|| {
            mime_guess::from_path(&upload.file_name)
                .first()
                .map(|m| m.essence_str().to_string())
        });

        debug!(path = %path, bytes = upload.data.len(), "Stored blob");

        Ok(StoredBlob {
            url: Some(format!("{}{path}", self.public_base_url)),
            size: upload.data.len() as u64,
            path: Some(path),
            mime_type,
            thumbnail_url: None,
        })
    }
}

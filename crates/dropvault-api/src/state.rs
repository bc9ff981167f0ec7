//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use dropvault_core::config::AppConfig;
use dropvault_core::traits::{BlobStore, IdentityResolver};
use dropvault_database::NodeStore;
use dropvault_service::{FolderService, ServiceTimeouts, UploadPolicy, UploadService};
use dropvault_storage::{StorageLayout, UploadSigner};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Collaborators ────────────────────────────────────────
    /// Session verification
    pub identity: Arc<dyn IdentityResolver>,
    /// File and folder metadata
    pub node_store: Arc<dyn NodeStore>,
    /// Uploaded bytes
    pub blob_store: Arc<dyn BlobStore>,
    /// Direct-upload credential signer, when provider keys are configured
    pub upload_signer: Option<Arc<UploadSigner>>,

    // ── Services ─────────────────────────────────────────────
    /// Folder creation and listing
    pub folder_service: Arc<FolderService>,
    /// File uploads
    pub upload_service: Arc<UploadService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("node_store", &self.node_store.backend())
            .field("blob_store", &self.blob_store.provider_type())
            .field("upload_signer", &self.upload_signer.is_some())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire services on top of the collaborators.
    pub fn new(
        config: AppConfig,
        identity: Arc<dyn IdentityResolver>,
        node_store: Arc<dyn NodeStore>,
        blob_store: Arc<dyn BlobStore>,
        upload_signer: Option<UploadSigner>,
    ) -> Self {
        let timeouts = ServiceTimeouts::from_config(&config);

        let folder_service = Arc::new(FolderService::new(Arc::clone(&node_store), timeouts));
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&node_store),
            Arc::clone(&blob_store),
            UploadPolicy::from_config(&config.upload),
            StorageLayout::new(&config.storage.root_folder),
            timeouts,
        ));

        Self {
            config: Arc::new(config),
            identity,
            node_store,
            blob_store,
            upload_signer: upload_signer.map(Arc::new),
            folder_service,
            upload_service,
        }
    }
}

//! File upload service: server-side uploads and registration of uploads
//! a client already sent to the provider.

use std::sync::Arc;

use bytes::Bytes;
use mime_guess::Mime;
use tracing::{debug, error, info};

use dropvault_core::error::AppError;
use dropvault_core::result::AppResult;
use dropvault_core::traits::storage::{BlobStore, BlobUpload};
use dropvault_core::types::NodeId;
use dropvault_database::NodeStore;
use dropvault_entity::node::{FALLBACK_FILE_TYPE, NewNode, Node, NodeKind};
use dropvault_storage::StorageLayout;

use crate::context::RequestContext;
use crate::file::policy::UploadPolicy;
use crate::folder::resolver::ParentResolver;
use crate::timeout::{ServiceTimeouts, bounded};

/// Name recorded when a registration carries none.
const UNTITLED: &str = "untitled";

/// Simple upload parameters (single request with full file body).
#[derive(Debug, Clone)]
pub struct SimpleUploadParams {
    /// Original file name, kept as the node name.
    pub file_name: String,
    /// Content type declared by the client.
    pub content_type: Option<String>,
    /// File content bytes.
    pub data: Bytes,
    /// Target folder (`None` for root).
    pub parent_id: Option<NodeId>,
    /// User id the client claims to act as, if it sent one.
    pub asserted_user_id: Option<String>,
}

/// Provider response a client forwards after uploading directly.
#[derive(Debug, Clone, Default)]
pub struct UploadedObject {
    /// Original file name.
    pub name: Option<String>,
    /// Size in bytes.
    pub size: u64,
    /// Provider storage path.
    pub file_path: Option<String>,
    /// Provider URL.
    pub url: Option<String>,
    /// Provider file category.
    pub file_type: Option<String>,
    /// MIME type.
    pub mime: Option<String>,
    /// Thumbnail URL.
    pub thumbnail_url: Option<String>,
}

/// Parameters for registering a direct upload.
#[derive(Debug, Clone)]
pub struct RegisterUploadParams {
    /// What the provider reported.
    pub upload: UploadedObject,
    /// Target folder (`None` for root).
    pub parent_id: Option<NodeId>,
    /// User id the client claims to act as, if it sent one.
    pub asserted_user_id: Option<String>,
}

/// Handles file uploads.
#[derive(Debug, Clone)]
pub struct UploadService {
    store: Arc<dyn NodeStore>,
    blobs: Arc<dyn BlobStore>,
    resolver: ParentResolver,
    policy: UploadPolicy,
    layout: StorageLayout,
    timeouts: ServiceTimeouts,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// The declared content type, if it parses as a MIME type.
fn declared_content_type(value: Option<String>) -> Option<String> {
    let value = non_blank(value)?;
    if value.parse::<Mime>().is_ok() {
        Some(value)
    } else {
        debug!(content_type = %value, "Ignoring unparseable content type");
        None
    }
}

fn invalid_upstream() -> AppError {
    AppError::validation("Invalid upload result")
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        store: Arc<dyn NodeStore>,
        blobs: Arc<dyn BlobStore>,
        policy: UploadPolicy,
        layout: StorageLayout,
        timeouts: ServiceTimeouts,
    ) -> Self {
        Self {
            resolver: ParentResolver::new(Arc::clone(&store), timeouts.store),
            store,
            blobs,
            policy,
            layout,
            timeouts,
        }
    }

    /// The policy applied to every upload.
    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Store `params.data` with the blob store and record a file node.
    ///
    /// Caller, extension, size and target folder are all checked before
    /// the blob store is called.
    pub async fn simple_upload(
        &self,
        ctx: &RequestContext,
        params: SimpleUploadParams,
    ) -> AppResult<Node> {
        ctx.ensure_asserted_user(params.asserted_user_id.as_deref())?;
        let extension = self.policy.check_file_name(&params.file_name)?;
        self.policy.check_size(params.data.len() as u64)?;
        let content_type = declared_content_type(params.content_type);
        let parent = self.resolver.resolve(ctx, params.parent_id).await?;

        let upload = BlobUpload {
            data: params.data,
            file_name: StorageLayout::stored_file_name(&extension),
            folder: self.layout.folder_for(&ctx.user_id, parent.id()),
            content_type: content_type.clone(),
        };
        let stored = bounded("blob store", self.timeouts.blob, self.blobs.store(upload)).await?;

        let file_url = non_blank(stored.url).ok_or_else(invalid_upstream)?;
        let path = non_blank(stored.path).ok_or_else(invalid_upstream)?;
        let mime_type = non_blank(stored.mime_type)
            .or(content_type)
            .unwrap_or_else(|| FALLBACK_FILE_TYPE.to_string());

        let record = NewNode::file(
            ctx.user_id.clone(),
            parent.id(),
            params.file_name,
            path.clone(),
            NodeKind::File {
                size: stored.size,
                mime_type,
                file_url,
                thumbnail_url: non_blank(stored.thumbnail_url),
            },
        );

        let file = bounded("node store", self.timeouts.store, self.store.insert(record))
            .await
            .inspect_err(|e| {
                error!(
                    user_id = %ctx.user_id,
                    orphaned_path = %path,
                    error = %e,
                    "Stored blob has no metadata record"
                );
            })?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            name = %file.name,
            size = file.kind.size(),
            "Simple upload completed"
        );

        Ok(file)
    }

    /// Record a file the client uploaded straight to the provider.
    pub async fn register_upload(
        &self,
        ctx: &RequestContext,
        params: RegisterUploadParams,
    ) -> AppResult<Node> {
        ctx.ensure_asserted_user(params.asserted_user_id.as_deref())?;

        let upload = params.upload;
        let invalid_data = || AppError::validation("Invalid upload data");
        let file_url = non_blank(upload.url).ok_or_else(invalid_data)?;
        let path = non_blank(upload.file_path).ok_or_else(invalid_data)?;

        let name = upload
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        // Without a name, the stored object's extension stands in.
        self.policy
            .check_file_name(name.as_deref().unwrap_or(&path))?;
        self.policy.check_size(upload.size)?;

        let parent = self.resolver.resolve(ctx, params.parent_id).await?;

        let mime_type = non_blank(upload.mime)
            .or(non_blank(upload.file_type))
            .unwrap_or_else(|| FALLBACK_FILE_TYPE.to_string());

        let record = NewNode::file(
            ctx.user_id.clone(),
            parent.id(),
            name.unwrap_or_else(|| UNTITLED.to_string()),
            path,
            NodeKind::File {
                size: upload.size,
                mime_type,
                file_url,
                thumbnail_url: non_blank(upload.thumbnail_url),
            },
        );

        let file = bounded("node store", self.timeouts.store, self.store.insert(record)).await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            path = %file.path,
            "Direct upload registered"
        );

        Ok(file)
    }
}

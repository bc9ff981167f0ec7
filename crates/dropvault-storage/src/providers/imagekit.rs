//! ImageKit blob store, using the server-side upload API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, warn};

use dropvault_core::config::ImageKitConfig;
use dropvault_core::error::{AppError, ErrorKind};
use dropvault_core::result::AppResult;
use dropvault_core::traits::storage::{BlobStore, BlobUpload, StoredBlob};

/// Fields of the upload API response that end up on a node.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    url: Option<String>,
    file_path: Option<String>,
    size: Option<u64>,
    mime: Option<String>,
    thumbnail_url: Option<String>,
}

impl UploadResponse {
    fn into_stored(self, fallback_size: u64, fallback_mime: Option<String>) -> StoredBlob {
        StoredBlob {
            url: self.url.filter(|u| !u.is_empty()),
            path: self.file_path.filter(|p| !p.is_empty()),
            size: self.size.unwrap_or(fallback_size),
            mime_type: self.mime.or(fallback_mime),
            thumbnail_url: self.thumbnail_url.filter(|t| !t.is_empty()),
        }
    }
}

/// Uploads through ImageKit and returns the CDN URLs.
#[derive(Clone)]
pub struct ImageKitBlobStore {
    client: reqwest::Client,
    upload_endpoint: String,
    private_key: String,
}

impl std::fmt::Debug for ImageKitBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageKitBlobStore")
            .field("upload_endpoint", &self.upload_endpoint)
            .finish_non_exhaustive()
    }
}

impl ImageKitBlobStore {
    /// Create a store for the configured account.
    pub fn new(config: &ImageKitConfig, timeout: Duration) -> AppResult<Self> {
        if !config.has_keys() {
            return Err(AppError::configuration(
                "storage.imagekit.public_key and private_key are required",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            upload_endpoint: config.upload_endpoint.clone(),
            private_key: config.private_key.clone(),
        })
    }
}

fn request_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() || e.is_connect() {
        AppError::with_source(
            ErrorKind::ServiceUnavailable,
            "Storage provider is unavailable",
            e,
        )
    } else {
        AppError::with_source(ErrorKind::ExternalService, "Storage provider request failed", e)
    }
}

#[async_trait]
impl BlobStore for ImageKitBlobStore {
    fn provider_type(&self) -> &str {
        "imagekit"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(!self.private_key.is_empty())
    }

    async fn store(&self, upload: BlobUpload) -> AppResult<StoredBlob> {
        let size = upload.data.len() as u64;

        let mut part = Part::bytes(upload.data.to_vec()).file_name(upload.file_name.clone());
        if let Some(content_type) = upload.content_type.as_deref() {
            part = part.mime_str(content_type).map_err(|e| {
                AppError::with_source(ErrorKind::Validation, "Invalid content type", e)
            })?;
        }

        let form = Form::new()
            .part("file", part)
            .text("fileName", upload.file_name.clone())
            .text("folder", upload.folder.clone())
            .text("useUniqueFileName", "false");

        let response = self
            .client
            .post(&self.upload_endpoint)
            .basic_auth(&self.private_key, Some(""))
            .multipart(form)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "ImageKit upload rejected");
            return Err(AppError::external(format!(
                "Storage provider returned {status}"
            )));
        }

        let parsed: UploadResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Malformed storage provider response",
                e,
            )
        })?;

        debug!(folder = %upload.folder, file_name = %upload.file_name, "Uploaded to ImageKit");
        Ok(parsed.into_stored(size, upload.content_type))
    }
}

//! Shared fixtures for service unit tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use dropvault_core::error::AppError;
use dropvault_core::result::AppResult;
use dropvault_core::traits::storage::{BlobStore, BlobUpload, StoredBlob};
use dropvault_core::types::{NodeId, UserId};
use dropvault_entity::node::{NewNode, NodeKind};

use crate::context::RequestContext;

pub fn ctx(user: &str) -> RequestContext {
    RequestContext::new(UserId::parse(user).expect("valid user"))
}

pub fn png_node(owner: &UserId, parent: Option<NodeId>, name: &str) -> NewNode {
    NewNode::file(
        owner.clone(),
        parent,
        name,
        format!("/dropvault/{owner}/root/{name}"),
        NodeKind::File {
            size: 4,
            mime_type: "image/png".to_string(),
            file_url: format!("https://cdn.test/{name}"),
            thumbnail_url: None,
        },
    )
}

/// How the fake answers `store`.
#[derive(Debug, Clone)]
pub enum BlobBehavior {
    /// Echo back a URL under `https://cdn.test`.
    Succeed,
    /// Answer without a URL.
    MissingUrl,
    /// Never answer within any sane timeout.
    Hang,
    /// Fail as the provider would.
    Fail,
}

/// Blob store fake that remembers every call.
#[derive(Debug)]
pub struct RecordingBlobStore {
    behavior: BlobBehavior,
    calls: Mutex<Vec<BlobUpload>>,
}

impl RecordingBlobStore {
    pub fn new(behavior: BlobBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<BlobUpload> {
        self.calls.lock().expect("lock").clone()
    }
}

#[async_trait]
impl BlobStore for RecordingBlobStore {
    fn provider_type(&self) -> &str {
        "recording"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn store(&self, upload: BlobUpload) -> AppResult<StoredBlob> {
        self.calls.lock().expect("lock").push(upload.clone());
        let path = format!("{}/{}", upload.folder, upload.file_name);
        match self.behavior {
            BlobBehavior::Succeed => Ok(StoredBlob {
                url: Some(format!("https://cdn.test{path}")),
                path: Some(path),
                size: upload.data.len() as u64,
                mime_type: Some("image/png".to_string()),
                thumbnail_url: Some("https://cdn.test/thumb".to_string()),
            }),
            BlobBehavior::MissingUrl => Ok(StoredBlob {
                url: None,
                path: Some(path),
                size: upload.data.len() as u64,
                mime_type: None,
                thumbnail_url: None,
            }),
            BlobBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(AppError::external("unreachable"))
            }
            BlobBehavior::Fail => Err(AppError::external("provider exploded")),
        }
    }
}

//! Where uploaded files land inside the provider.

use uuid::Uuid;

use dropvault_core::types::{NodeId, UserId};

/// Maps owners and target folders to provider folders.
///
/// Root uploads go to `{root}/{user}/root`, uploads into a folder go to
/// `{root}/{user}/folders/{folder_id}`.
#[derive(Debug, Clone)]
pub struct StorageLayout {
    root_folder: String,
}

impl StorageLayout {
    /// Create a layout under `root_folder` (e.g. `/dropvault`).
    pub fn new(root_folder: &str) -> Self {
        let trimmed = root_folder.trim().trim_matches('/');
        let root_folder = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        Self { root_folder }
    }

    /// Provider folder for a new file owned by `user_id` inside `parent_id`.
    pub fn folder_for(&self, user_id: &UserId, parent_id: Option<NodeId>) -> String {
        match parent_id {
            Some(parent) => format!("{}/{user_id}/folders/{parent}", self.root_folder),
            None => format!("{}/{user_id}/root", self.root_folder),
        }
    }

    /// Collision-free object name keeping the original extension.
    pub fn stored_file_name(extension: &str) -> String {
        format!("{}.{}", Uuid::new_v4(), extension.to_ascii_lowercase())
    }
}

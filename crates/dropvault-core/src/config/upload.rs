//! Upload policy configuration.

use serde::{Deserialize, Serialize};

/// Limits applied to every uploaded file before it reaches storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum accepted file size in bytes (default 20 MiB).
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,
    /// Lowercase extensions accepted for upload.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

fn default_max_file_size() -> u64 {
    20 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "gif", "pdf"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

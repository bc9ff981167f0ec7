//! Blob storage provider configuration.

use serde::{Deserialize, Serialize};

/// Which provider stores uploaded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderKind {
    /// Local filesystem served under a public base URL.
    Local,
    /// ImageKit upload API and CDN.
    #[serde(rename = "imagekit")]
    ImageKit,
}

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Provider to use.
    #[serde(default = "default_provider")]
    pub provider: StorageProviderKind,
    /// Provider folder under which every user's files live.
    #[serde(default = "default_root_folder")]
    pub root_folder: String,
    /// Upper bound for a single provider call, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Lifetime of direct-upload credentials, in seconds.
    #[serde(default = "default_credential_ttl")]
    pub credential_ttl_seconds: u64,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// ImageKit configuration.
    #[serde(default)]
    pub imagekit: ImageKitConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            root_folder: default_root_folder(),
            timeout_seconds: default_timeout(),
            credential_ttl_seconds: default_credential_ttl(),
            local: LocalStorageConfig::default(),
            imagekit: ImageKitConfig::default(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for local file storage.
    #[serde(default = "default_local_root")]
    pub root_path: String,
    /// URL prefix under which stored files are served.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
            public_base_url: default_public_base_url(),
        }
    }
}

/// ImageKit account configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageKitConfig {
    /// Public API key, handed to clients with upload credentials.
    #[serde(default)]
    pub public_key: String,
    /// Private API key. Never leaves the server.
    #[serde(default)]
    pub private_key: String,
    /// CDN URL endpoint of the account.
    #[serde(default)]
    pub url_endpoint: String,
    /// Upload API endpoint.
    #[serde(default = "default_upload_endpoint")]
    pub upload_endpoint: String,
}

impl Default for ImageKitConfig {
    fn default() -> Self {
        Self {
            public_key: String::new(),
            private_key: String::new(),
            url_endpoint: String::new(),
            upload_endpoint: default_upload_endpoint(),
        }
    }
}

impl ImageKitConfig {
    /// Whether both API keys are present.
    pub fn has_keys(&self) -> bool {
        !self.public_key.is_empty() && !self.private_key.is_empty()
    }
}

fn default_provider() -> StorageProviderKind {
    StorageProviderKind::Local
}

fn default_root_folder() -> String {
    "/dropvault".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_credential_ttl() -> u64 {
    1800
}

fn default_local_root() -> String {
    "./data/storage".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080/blobs".to_string()
}

fn default_upload_endpoint() -> String {
    "https://upload.imagekit.io/api/v1/files/upload".to_string()
}

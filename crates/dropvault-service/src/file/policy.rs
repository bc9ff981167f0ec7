//! Which files may be uploaded.

use dropvault_core::config::UploadConfig;
use dropvault_core::error::AppError;
use dropvault_core::result::AppResult;

/// Extension allow-list and size ceiling, applied before any storage call.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_file_size_bytes: u64,
    allowed_extensions: Vec<String>,
}

impl UploadPolicy {
    /// Build from configuration; extensions are compared lowercase.
    pub fn from_config(config: &UploadConfig) -> Self {
        Self {
            max_file_size_bytes: config.max_file_size_bytes,
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
        }
    }

    /// Largest accepted file, in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }

    /// Lowercased text after the last `.` of `file_name`, if non-empty.
    pub fn extension_of(file_name: &str) -> Option<String> {
        let (_, ext) = file_name.rsplit_once('.')?;
        let ext = ext.trim();
        if ext.is_empty() {
            None
        } else {
            Some(ext.to_ascii_lowercase())
        }
    }

    /// Check the name's extension against the allow-list and return it.
    pub fn check_file_name(&self, file_name: &str) -> AppResult<String> {
        match Self::extension_of(file_name) {
            Some(ext) if self.allowed_extensions.contains(&ext) => Ok(ext),
            _ => Err(AppError::validation(format!(
                "Invalid file type. Allowed: {}",
                self.allowed_extensions.join(", ")
            ))),
        }
    }

    /// Check a size in bytes against the ceiling.
    pub fn check_size(&self, size: u64) -> AppResult<()> {
        if size > self.max_file_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum size of {} MB",
                self.max_file_size_bytes / (1024 * 1024)
            )));
        }
        Ok(())
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::from_config(&UploadConfig::default())
    }
}

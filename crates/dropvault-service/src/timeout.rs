//! Upper bounds for calls to the node store and the blob store.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use dropvault_core::config::AppConfig;
use dropvault_core::error::AppError;
use dropvault_core::result::AppResult;

/// Per-dependency call timeouts.
#[derive(Debug, Clone, Copy)]
pub struct ServiceTimeouts {
    /// Bound for one node store call.
    pub store: Duration,
    /// Bound for one blob store call.
    pub blob: Duration,
}

impl ServiceTimeouts {
    /// Read both bounds from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            store: Duration::from_secs(config.database.operation_timeout_seconds),
            blob: Duration::from_secs(config.storage.timeout_seconds),
        }
    }
}

impl Default for ServiceTimeouts {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Run `fut`, failing with a service-unavailable error once `limit` passes.
pub async fn bounded<T, F>(dependency: &'static str, limit: Duration, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            warn!(dependency, timeout_ms = limit.as_millis() as u64, "Dependency timed out");
            Err(AppError::service_unavailable(format!(
                "{dependency} did not respond in time"
            )))
        }
    }
}

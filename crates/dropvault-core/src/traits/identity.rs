//! Caller identity resolution.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::UserId;

/// Maps a session credential to the user it was issued for.
#[async_trait]
pub trait IdentityResolver: Send + Sync + 'static {
    /// Resolve a bearer credential. `Ok(None)` means the credential is not
    /// valid; `Err` is reserved for failures of the resolver itself.
    async fn resolve(&self, credential: &str) -> AppResult<Option<UserId>>;
}

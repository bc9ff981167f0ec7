//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use tracing::warn;

use dropvault_core::error::AppError;
use dropvault_core::result::AppResult;
use dropvault_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built by the API layer from the verified session and passed into
/// service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            request_time: Utc::now(),
        }
    }

    /// Compare a client-supplied user id with the session identity.
    ///
    /// A blank or missing assertion is ignored. Anything else must match
    /// exactly; the asserted value is never used as the identity.
    pub fn ensure_asserted_user(&self, asserted: Option<&str>) -> AppResult<()> {
        match asserted.map(str::trim).filter(|s| !s.is_empty()) {
            Some(claimed) if claimed != self.user_id.as_str() => {
                warn!(
                    user_id = %self.user_id,
                    asserted = %claimed,
                    "Asserted user id does not match session"
                );
                Err(AppError::unauthorized("Unauthorized"))
            }
            _ => Ok(()),
        }
    }
}

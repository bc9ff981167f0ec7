//! Claims carried by identity provider session tokens.

use serde::{Deserialize, Serialize};

use dropvault_core::types::UserId;

/// The subset of session claims DropVault reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the provider's user id, e.g. `user_2abc`.
    pub sub: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issued-at timestamp (seconds since epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Provider session id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
}

impl SessionClaims {
    /// The owner id named by the subject claim, if it is not blank.
    pub fn user_id(&self) -> Option<UserId> {
        UserId::parse(&self.sub)
    }
}

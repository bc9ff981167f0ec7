//! JWT session token validation.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use dropvault_core::config::AuthConfig;
use dropvault_core::result::AppResult;
use dropvault_core::traits::IdentityResolver;
use dropvault_core::types::UserId;

use super::claims::SessionClaims;

/// Validates session tokens and resolves them to user ids.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if !config.issuer.is_empty() {
            validation.set_issuer(&[config.issuer.as_str()]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token, returning its claims.
    pub fn decode_claims(&self, token: &str) -> Option<SessionClaims> {
        match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!(reason = ?e.kind(), "Rejected session token");
                None
            }
        }
    }
}

#[async_trait]
impl IdentityResolver for JwtDecoder {
    async fn resolve(&self, credential: &str) -> AppResult<Option<UserId>> {
        Ok(self
            .decode_claims(credential)
            .and_then(|claims| claims.user_id()))
    }
}

//! Credentials that let a client upload straight to the provider.

use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha1::Sha1;
use uuid::Uuid;

use dropvault_core::config::StorageConfig;
use dropvault_core::error::AppError;
use dropvault_core::result::AppResult;

type HmacSha1 = Hmac<Sha1>;

/// A one-off upload authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadCredentials {
    /// Random single-use token.
    pub token: String,
    /// Unix timestamp after which the provider rejects the token.
    pub expire: i64,
    /// Hex HMAC-SHA1 of `token + expire` under the private key.
    pub signature: String,
    /// Account public key.
    pub public_key: String,
}

/// Issues [`UploadCredentials`].
#[derive(Clone)]
pub struct UploadSigner {
    public_key: String,
    private_key: String,
    ttl_seconds: i64,
}

impl std::fmt::Debug for UploadSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadSigner")
            .field("public_key", &self.public_key)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl UploadSigner {
    /// Build a signer from the ImageKit keys in `config`.
    pub fn from_config(config: &StorageConfig) -> AppResult<Self> {
        if !config.imagekit.has_keys() {
            return Err(AppError::configuration(
                "Upload credentials require storage.imagekit keys",
            ));
        }
        let ttl_seconds = i64::try_from(config.credential_ttl_seconds)
            .map_err(|_| AppError::configuration("credential_ttl_seconds out of range"))?;

        Ok(Self {
            public_key: config.imagekit.public_key.clone(),
            private_key: config.imagekit.private_key.clone(),
            ttl_seconds,
        })
    }

    /// Issue fresh credentials valid for the configured lifetime.
    pub fn issue(&self) -> AppResult<UploadCredentials> {
        let token = Uuid::new_v4().to_string();
        let expire = Utc::now().timestamp() + self.ttl_seconds;
        self.sign(token, expire)
    }

    /// Sign a given token and expiry.
    pub fn sign(&self, token: String, expire: i64) -> AppResult<UploadCredentials> {
        let mut mac = HmacSha1::new_from_slice(self.private_key.as_bytes())
            .map_err(|_| AppError::internal("Invalid signing key"))?;
        mac.update(token.as_bytes());
        mac.update(expire.to_string().as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(UploadCredentials {
            token,
            expire,
            signature,
            public_key: self.public_key.clone(),
        })
    }
}

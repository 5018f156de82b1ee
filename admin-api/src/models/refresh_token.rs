//! Refresh token model - long-lived opaque credentials.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::FromRow;
use uuid::Uuid;

/// Stored refresh token. Only the SHA-256 hash of the opaque value is
/// persisted; the raw value lives in the client cookie.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub token_id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_utc: DateTime<Utc>,
    pub created_utc: DateTime<Utc>,
}

impl RefreshToken {
    /// Create a new refresh token record for an opaque token value.
    pub fn new(user_id: Uuid, token: &str, expires_in_days: i64) -> Self {
        let now = Utc::now();

        Self {
            token_id: Uuid::new_v4(),
            user_id,
            token_hash: Self::hash_token(token),
            expires_utc: now + Duration::days(expires_in_days),
            created_utc: now,
        }
    }

    /// Generate a new opaque token value (32 random bytes, hex).
    pub fn generate_opaque() -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Hash a token using SHA-256.
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Check if this token is past its expiry.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_utc
    }
}

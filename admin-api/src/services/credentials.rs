//! Credential validation - the two token paths into the system.
//!
//! Access path: bearer JWT, cryptographically verified, then resolved
//! against the store into a full principal.
//! Refresh path: opaque cookie value looked up in the store; expired
//! records are purged on read (lazy cleanup, no background sweep).

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::{JwtService, ServiceError};
use crate::store::IdentityStore;

/// The authenticated identity attached to a validated request.
#[derive(Debug, Clone, Serialize)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub roles: Vec<String>,
    /// De-duplicated "resource.action" keys flattened from all roles.
    pub permissions: Vec<String>,
}

/// Minimal principal for refresh exchanges. Refresh only mints a new
/// access token, so no role or permission claims are loaded.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshPrincipal {
    pub user_id: Uuid,
    pub email: String,
    pub token_id: Uuid,
}

#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn IdentityStore>,
    jwt: JwtService,
}

impl CredentialService {
    pub fn new(store: Arc<dyn IdentityStore>, jwt: JwtService) -> Self {
        Self { store, jwt }
    }

    /// Validate a bearer access token and resolve the full principal.
    ///
    /// Fails when the signature or expiry is invalid, or when the
    /// referenced user is missing or inactive.
    pub async fn validate_access_token(&self, token: &str) -> Result<Principal, ServiceError> {
        let claims = self
            .jwt
            .validate_access_token(token)
            .map_err(|_| ServiceError::InvalidAccessToken)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| ServiceError::InvalidAccessToken)?;

        let aggregate = self
            .store
            .get_user_with_roles(user_id)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        if !aggregate.user.is_active {
            return Err(ServiceError::UserInactive);
        }

        Ok(Principal {
            user_id: aggregate.user.user_id,
            email: aggregate.user.email.clone(),
            display_name: aggregate.user.display_name.clone(),
            avatar_url: aggregate.user.avatar_url.clone(),
            roles: aggregate.role_names(),
            permissions: aggregate.permission_keys().into_iter().collect(),
        })
    }

    /// Validate an opaque refresh token read from the cookie.
    ///
    /// An expired record fails validation and is deleted as a side
    /// effect; a racing delete is harmless.
    pub async fn validate_refresh_token(
        &self,
        token: Option<&str>,
    ) -> Result<RefreshPrincipal, ServiceError> {
        let token = token.ok_or(ServiceError::MissingRefreshToken)?;

        let record = self
            .store
            .find_refresh_token(token)
            .await?
            .ok_or(ServiceError::InvalidRefreshToken)?;

        if record.is_expired() {
            if let Err(e) = self.store.delete_refresh_token(record.token_id).await {
                tracing::warn!(token_id = %record.token_id, error = %e, "Failed to purge expired refresh token");
            }
            return Err(ServiceError::RefreshTokenExpired);
        }

        let user = self
            .store
            .find_user_by_id(record.user_id)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        if !user.is_active {
            return Err(ServiceError::UserInactive);
        }

        Ok(RefreshPrincipal {
            user_id: user.user_id,
            email: user.email,
            token_id: record.token_id,
        })
    }
}

//! Session flow - login, refresh rotation, logout.

use serde::Serialize;
use std::sync::Arc;

use super::{CredentialService, JwtService, ServiceError};
use crate::models::{RefreshToken, UserResponse};
use crate::store::IdentityStore;
use crate::utils::password::{verify_password, Password, PasswordHashString};

/// Result of a successful login or refresh. The raw refresh token is
/// transported to the client via the `refreshToken` cookie only, never
/// in the response body.
#[derive(Debug)]
pub struct SessionTokens {
    pub access_token: String,
    pub expires_in: i64,
    pub refresh_token: String,
    pub user: UserResponse,
}

/// Body shape for token responses.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

impl From<&SessionTokens> for TokenResponse {
    fn from(tokens: &SessionTokens) -> Self {
        Self {
            access_token: tokens.access_token.clone(),
            token_type: "Bearer".to_string(),
            expires_in: tokens.expires_in,
            user: tokens.user.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn IdentityStore>,
    jwt: JwtService,
    credentials: CredentialService,
    refresh_token_expiry_days: i64,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn IdentityStore>,
        jwt: JwtService,
        credentials: CredentialService,
        refresh_token_expiry_days: i64,
    ) -> Self {
        Self {
            store,
            jwt,
            credentials,
            refresh_token_expiry_days,
        }
    }

    pub fn refresh_token_expiry_days(&self) -> i64 {
        self.refresh_token_expiry_days
    }

    /// Authenticate with email/password and mint a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionTokens, ServiceError> {
        let user = self
            .store
            .find_user_by_email(email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        verify_password(
            &Password::new(password.to_string()),
            &PasswordHashString::new(user.password_hash.clone()),
        )
        .map_err(|_| ServiceError::InvalidCredentials)?;

        if !user.is_active {
            return Err(ServiceError::UserInactive);
        }

        self.mint_session(&user).await
    }

    /// Exchange a refresh token cookie for a new session, rotating the
    /// stored record.
    pub async fn refresh(&self, cookie: Option<&str>) -> Result<SessionTokens, ServiceError> {
        let principal = self.credentials.validate_refresh_token(cookie).await?;

        let user = self
            .store
            .find_user_by_id(principal.user_id)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        // Rotation: the presented token is spent regardless of what
        // happens next.
        self.store.delete_refresh_token(principal.token_id).await?;

        self.mint_session(&user).await
    }

    /// Invalidate the presented refresh token. Unknown tokens are a
    /// no-op: logout is idempotent.
    pub async fn logout(&self, cookie: Option<&str>) -> Result<(), ServiceError> {
        if let Some(token) = cookie {
            if let Some(record) = self.store.find_refresh_token(token).await? {
                self.store.delete_refresh_token(record.token_id).await?;
            }
        }
        Ok(())
    }

    async fn mint_session(
        &self,
        user: &crate::models::User,
    ) -> Result<SessionTokens, ServiceError> {
        let access_token = self
            .jwt
            .generate_access_token(&user.user_id.to_string(), &user.email)?;

        let raw_refresh = RefreshToken::generate_opaque();
        let record = RefreshToken::new(user.user_id, &raw_refresh, self.refresh_token_expiry_days);
        self.store.insert_refresh_token(&record).await?;

        Ok(SessionTokens {
            access_token,
            expires_in: self.jwt.access_token_expiry_seconds(),
            refresh_token: raw_refresh,
            user: user.sanitized(),
        })
    }
}

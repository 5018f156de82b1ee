use panel_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Store error: {0}")]
    Store(AppError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired access token")]
    InvalidAccessToken,

    #[error("Refresh token missing")]
    MissingRefreshToken,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("User not found")]
    UserNotFound,

    #[error("User is inactive")]
    UserInactive,
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        ServiceError::Store(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Store(e) => e,
            ServiceError::Internal(e) => AppError::InternalError(e),
            ServiceError::InvalidCredentials => {
                AppError::AuthError(anyhow::anyhow!("Invalid credentials"))
            }
            ServiceError::InvalidAccessToken => {
                AppError::AuthError(anyhow::anyhow!("Invalid or expired access token"))
            }
            ServiceError::MissingRefreshToken => {
                AppError::AuthError(anyhow::anyhow!("Refresh token missing"))
            }
            ServiceError::InvalidRefreshToken => {
                AppError::AuthError(anyhow::anyhow!("Invalid refresh token"))
            }
            ServiceError::RefreshTokenExpired => {
                AppError::AuthError(anyhow::anyhow!("Refresh token expired"))
            }
            ServiceError::UserNotFound => AppError::AuthError(anyhow::anyhow!("User not found")),
            ServiceError::UserInactive => AppError::AuthError(anyhow::anyhow!("User is inactive")),
        }
    }
}

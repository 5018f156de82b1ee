//! User profile handlers.

use axum::{response::IntoResponse, Json};
use panel_core::error::AppError;

use crate::middleware::AuthUser;

/// Return the authenticated principal with its derived claims.
pub async fn get_me(AuthUser(principal): AuthUser) -> Result<impl IntoResponse, AppError> {
    Ok(Json(principal))
}

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::IntoResponse,
};
use panel_core::error::AppError;

use crate::{services::Principal, AppState};

/// Middleware to require a valid bearer access token. On success the
/// resolved principal is attached to the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let token = match token {
        Some(token) => token,
        None => {
            return Err(AppError::AuthError(anyhow::anyhow!(
                "Missing or invalid Authorization header"
            )));
        }
    };

    let principal = state.credentials.validate_access_token(token).await?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Extractor to easily get the principal in handlers
pub struct AuthUser(pub Principal);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = parts.extensions.get::<Principal>().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "Principal missing from request extensions"
            ))
        })?;

        Ok(AuthUser(principal.clone()))
    }
}

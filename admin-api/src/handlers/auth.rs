//! Session handlers: login, refresh, logout.
//!
//! The refresh token travels in an HttpOnly cookie; response bodies
//! only ever carry the short-lived access token.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use panel_core::error::AppError;
use serde::Deserialize;
use validator::Validate;

use crate::services::TokenResponse;
use crate::utils::ValidatedJson;
use crate::AppState;

/// Cookie carrying the opaque refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

fn refresh_cookie(token: String, expiry_days: i64) -> Cookie<'static> {
    Cookie::build((REFRESH_TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(expiry_days))
        .build()
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build((REFRESH_TOKEN_COOKIE, ""))
        .path("/")
        .build()
}

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.auth.login(&req.email, &req.password).await?;

    let body = TokenResponse::from(&session);
    let jar = jar.add(refresh_cookie(
        session.refresh_token,
        state.auth.refresh_token_expiry_days(),
    ));

    Ok((StatusCode::OK, jar, Json(body)))
}

/// Exchange the refresh token cookie for a new access token
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let cookie = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string());

    let session = state.auth.refresh(cookie.as_deref()).await?;

    let body = TokenResponse::from(&session);
    let jar = jar.add(refresh_cookie(
        session.refresh_token,
        state.auth.refresh_token_expiry_days(),
    ));

    Ok((StatusCode::OK, jar, Json(body)))
}

/// Logout and invalidate the refresh token
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let cookie = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string());

    state.auth.logout(cookie.as_deref()).await?;

    let jar = jar.remove(removal_cookie());

    Ok((
        StatusCode::OK,
        jar,
        Json(serde_json::json!({
            "message": "Logged out successfully"
        })),
    ))
}

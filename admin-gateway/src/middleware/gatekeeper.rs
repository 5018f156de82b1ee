//! Route gatekeeper - cheap presence check in front of panel pages.
//!
//! This is not a security boundary: it only checks that the refresh
//! token cookie exists and redirects to the login flow when it does
//! not. Cryptographic validation of tokens happens in the backend
//! credential validator on every protected API call.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

/// Cookie carrying the opaque refresh token, set by the backend login
/// and refresh flows.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Pages reachable without a session.
const PUBLIC_PATHS: &[&str] = &["/", "/login", "/register", "/forgot-password"];

/// Prefixes reachable without a session (assets, liveness).
const PUBLIC_PREFIXES: &[&str] = &["/static", "/health"];

/// Classify a request path as public or protected. Prefixes match only
/// on a segment boundary, so `/staticky` stays protected.
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
        || PUBLIC_PREFIXES.iter().any(|prefix| {
            path == *prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
}

/// Redirect target for unauthenticated access, preserving the original
/// path for post-login navigation.
pub fn login_redirect_target(path: &str) -> String {
    format!("/login?callbackUrl={}", urlencoding::encode(path))
}

pub async fn gatekeeper_middleware(jar: CookieJar, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    if is_public_path(&path) {
        return next.run(request).await;
    }

    if jar.get(REFRESH_TOKEN_COOKIE).is_none() {
        tracing::debug!(path = %path, "No session cookie, redirecting to login");
        return Redirect::temporary(&login_redirect_target(&path)).into_response();
    }

    next.run(request).await
}

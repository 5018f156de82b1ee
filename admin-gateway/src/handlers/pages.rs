use axum::extract::State;
use axum::response::{Html, IntoResponse};

use crate::config::ApiSettings;

pub async fn index(State(api): State<ApiSettings>) -> impl IntoResponse {
    Html(page(
        &api,
        "Admin Panel",
        r#"<p>Welcome. <a href="/dashboard">Open the dashboard</a> or <a href="/login">sign in</a>.</p>"#,
    ))
}

pub async fn login_page(State(api): State<ApiSettings>) -> impl IntoResponse {
    Html(page(
        &api,
        "Sign in",
        r#"<form id="login-form">
  <label>Email <input type="email" name="email" required></label>
  <label>Password <input type="password" name="password" required></label>
  <button type="submit">Sign in</button>
</form>
<p><a href="/forgot-password">Forgot password?</a></p>"#,
    ))
}

pub async fn register_page(State(api): State<ApiSettings>) -> impl IntoResponse {
    Html(page(
        &api,
        "Create account",
        r#"<p>Account creation is handled by an administrator. <a href="/login">Back to sign in</a>.</p>"#,
    ))
}

pub async fn forgot_password_page(State(api): State<ApiSettings>) -> impl IntoResponse {
    Html(page(
        &api,
        "Reset password",
        r#"<p>Contact an administrator to reset your password. <a href="/login">Back to sign in</a>.</p>"#,
    ))
}

pub async fn dashboard_page(State(api): State<ApiSettings>) -> impl IntoResponse {
    Html(page(
        &api,
        "Dashboard",
        r#"<nav><a href="/users">Users</a></nav>
<div id="dashboard-root"></div>"#,
    ))
}

pub async fn users_page(State(api): State<ApiSettings>) -> impl IntoResponse {
    Html(page(&api, "Users", r#"<div id="users-root"></div>"#))
}

pub async fn health_check() -> &'static str {
    "OK"
}

/// Shared page shell. The backend base URL is exposed through a meta
/// tag for the browser-side panel scripts.
fn page(api: &ApiSettings, title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="api-base" content="{api_base}">
  <title>{title}</title>
  <link rel="stylesheet" href="/static/panel.css">
</head>
<body>
  <main>
    <h1>{title}</h1>
{body}
  </main>
</body>
</html>
"#,
        api_base = api.url,
    )
}

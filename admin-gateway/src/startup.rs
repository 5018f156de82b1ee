use axum::{middleware::from_fn, routing::get, Router};
use panel_core::middleware::tracing::request_id_middleware;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ApiSettings;
use crate::handlers::pages::{
    dashboard_page, forgot_password_page, health_check, index, login_page, register_page,
    users_page,
};
use crate::middleware::gatekeeper::gatekeeper_middleware;

pub fn build_router(api: ApiSettings, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/login", get(login_page))
        .route("/register", get(register_page))
        .route("/forgot-password", get(forgot_password_page))
        .route("/dashboard", get(dashboard_page))
        .route("/users", get(users_page))
        .route("/users/:id", get(users_page))
        .with_state(api)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(from_fn(gatekeeper_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
}

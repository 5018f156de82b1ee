pub mod config;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Json, Router,
};
use panel_core::error::AppError;
use panel_core::middleware::{
    rate_limit::{
        client_rate_limit_middleware, route_rate_limit_middleware, ClientRateLimiter,
        RouteRateLimiter,
    },
    security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AdminConfig;
use crate::services::{AuthService, CredentialService, JwtService, PermissionService};
use crate::store::IdentityStore;

#[derive(Clone)]
pub struct AppState {
    pub config: AdminConfig,
    pub store: Arc<dyn IdentityStore>,
    pub jwt: JwtService,
    pub credentials: CredentialService,
    pub auth: AuthService,
    pub permissions: PermissionService,
    pub login_rate_limiter: RouteRateLimiter,
    pub ip_rate_limiter: ClientRateLimiter,
}

impl AppState {
    /// Wire up the service graph over a store implementation.
    pub fn new(
        config: AdminConfig,
        store: Arc<dyn IdentityStore>,
        jwt: JwtService,
        login_rate_limiter: RouteRateLimiter,
        ip_rate_limiter: ClientRateLimiter,
    ) -> Self {
        let credentials = CredentialService::new(store.clone(), jwt.clone());
        let auth = AuthService::new(
            store.clone(),
            jwt.clone(),
            credentials.clone(),
            config.jwt.refresh_token_expiry_days,
        );
        let permissions = PermissionService::new(store.clone());

        Self {
            config,
            store,
            jwt,
            credentials,
            auth,
            permissions,
            login_rate_limiter,
            ip_rate_limiter,
        }
    }
}

pub fn build_router(state: AppState) -> Result<Router, AppError> {
    // Login route with its own, stricter rate limit
    let login_limiter = state.login_rate_limiter.clone();
    let login_route = Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .layer(from_fn_with_state(login_limiter, route_rate_limit_middleware));

    // Routes requiring a validated bearer token
    let protected_routes = Router::new()
        .route("/users/me", get(handlers::user::get_me))
        .route("/permissions", get(handlers::permission::list_permissions))
        .route(
            "/permissions/grouped",
            get(handlers::permission::list_permissions_grouped),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    let ip_limiter = state.ip_rate_limiter.clone();

    let app = Router::new()
        .route("/health", get(health_check))
        .merge(login_route)
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .merge(protected_routes)
        .with_state(state.clone())
        // Global IP rate limiting
        .layer(from_fn_with_state(ip_limiter, client_rate_limit_middleware))
        // Add tracing layer
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
                    version = ?request.version(),
                )
            }),
        )
        // Add tracing middleware for request_id
        .layer(from_fn(request_id_middleware))
        // Add security headers middleware
        .layer(from_fn(security_headers_middleware))
        // Add CORS layer
        .layer(
            CorsLayer::new()
                .allow_origin(
                    state
                        .config
                        .security
                        .allowed_origins
                        .iter()
                        .filter_map(|o| {
                            o.parse::<axum::http::HeaderValue>()
                                .map_err(|e| {
                                    tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e);
                                })
                                .ok()
                        })
                        .collect::<Vec<axum::http::HeaderValue>>(),
                )
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PATCH,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                ])
                .allow_credentials(true),
        );

    Ok(app)
}

/// Service health check
pub async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.store.health_check().await.map_err(|e| {
        tracing::error!(error = %e, "Store health check failed");
        e
    })?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "service": state.config.service_name,
        "version": state.config.service_version,
        "environment": format!("{:?}", state.config.environment),
        "checks": {
            "postgres": "up"
        }
    })))
}

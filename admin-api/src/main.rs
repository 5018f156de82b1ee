use admin_api::{build_router, config::AdminConfig, db, services::JwtService, store::PgStore, AppState};
use panel_core::middleware::rate_limit::{client_rate_limiter, route_rate_limiter};
use panel_core::observability::logging::init_tracing;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), panel_core::error::AppError> {
    // Load configuration - fail fast if invalid
    let config = AdminConfig::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        environment = ?config.environment,
        "Starting admin panel backend"
    );

    // Initialize database
    let pool = db::create_pool(&config.database)
        .await
        .map_err(|e| panel_core::error::AppError::DatabaseError(anyhow::anyhow!(e)))?;
    db::run_migrations(&pool)
        .await
        .map_err(|e| panel_core::error::AppError::DatabaseError(anyhow::anyhow!(e)))?;
    let store = Arc::new(PgStore::new(pool));

    // Initialize JWT service
    let jwt = JwtService::new(&config.jwt)?;
    tracing::info!("JWT service initialized");

    // Initialize rate limiters
    let login_rate_limiter = route_rate_limiter(
        config.rate_limit.login_attempts,
        config.rate_limit.login_window_seconds,
    );
    let ip_rate_limiter = client_rate_limiter(
        config.rate_limit.global_ip_limit,
        config.rate_limit.global_ip_window_seconds,
    );
    tracing::info!("Rate limiters initialized: Login and Global IP");

    // Create application state and router
    let state = AppState::new(config.clone(), store, jwt, login_rate_limiter, ip_rate_limiter);
    let app = build_router(state)?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
    tracing::info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Service shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}

//! Request throttling.
//!
//! Two limiter flavors cover the panel's needs: a route limiter with a
//! single shared budget (the login endpoint) and a client limiter that
//! tracks budgets per source address (the global backstop). Exceeding
//! either yields a 429 with a `Retry-After` hint.

use crate::error::AppError;
use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use governor::{
    clock::{Clock, DefaultClock},
    state::{keyed::DashMapStateStore, InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{net::IpAddr, net::SocketAddr, num::NonZeroU32, sync::Arc, time::Duration};

/// Shared-budget limiter for a single route.
pub type RouteRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Per-client limiter keyed by source address.
pub type ClientRateLimiter =
    Arc<RateLimiter<SocketAddr, DashMapStateStore<SocketAddr>, DefaultClock>>;

/// Translate a (limit, window) pair into a governor quota. Zero values
/// are clamped so misconfiguration degrades to the tightest budget
/// instead of panicking at startup.
fn quota(limit: u32, window_seconds: u64) -> Quota {
    let limit = NonZeroU32::new(limit.max(1)).unwrap_or(NonZeroU32::MIN);
    let window = Duration::from_secs(window_seconds.max(1));
    let replenish = (window / limit.get()).max(Duration::from_millis(1));

    Quota::with_period(replenish)
        .unwrap_or_else(|| Quota::per_second(limit))
        .allow_burst(limit)
}

pub fn route_rate_limiter(limit: u32, window_seconds: u64) -> RouteRateLimiter {
    Arc::new(RateLimiter::direct(quota(limit, window_seconds)))
}

pub fn client_rate_limiter(limit: u32, window_seconds: u64) -> ClientRateLimiter {
    Arc::new(RateLimiter::dashmap(quota(limit, window_seconds)))
}

/// The client address for throttling purposes. A proxy-supplied
/// `x-forwarded-for` entry wins over the socket peer.
fn client_addr(request: &Request) -> Option<SocketAddr> {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse::<IpAddr>().ok());

    if let Some(ip) = forwarded {
        return Some(SocketAddr::new(ip, 0));
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr)
}

fn retry_after_seconds(denied: governor::NotUntil<governor::clock::QuantaInstant>) -> u64 {
    denied.wait_time_from(DefaultClock::default().now()).as_secs()
}

/// Enforce a shared budget on the wrapped route.
pub async fn route_rate_limit_middleware(
    State(limiter): State<RouteRateLimiter>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Err(denied) = limiter.check() {
        return Err(AppError::TooManyRequests(
            "Request rate limit exceeded".to_string(),
            Some(retry_after_seconds(denied)),
        ));
    }

    Ok(next.run(request).await)
}

/// Enforce a per-client budget. Requests whose source cannot be
/// determined pass through with a warning rather than sharing one
/// anonymous bucket.
pub async fn client_rate_limit_middleware(
    State(limiter): State<ClientRateLimiter>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(addr) = client_addr(&request) else {
        tracing::warn!("Client address unavailable, skipping rate limit");
        return Ok(next.run(request).await);
    };

    if let Err(denied) = limiter.check_key(&addr) {
        return Err(AppError::TooManyRequests(
            "Request rate limit exceeded for this client".to_string(),
            Some(retry_after_seconds(denied)),
        ));
    }

    Ok(next.run(request).await)
}

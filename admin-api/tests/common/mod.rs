//! Test helper module for admin-api integration tests.
//!
//! Builds the application state over the in-memory identity store so
//! no PostgreSQL instance is needed.

#![allow(dead_code)]

use admin_api::{
    config::{AdminConfig, DatabaseConfig, JwtConfig, RateLimitConfig, SecurityConfig},
    models::{Permission, RefreshToken, Role, User},
    services::JwtService,
    store::{IdentityStore, MemoryStore},
    utils::password::{hash_password, Password},
    AppState,
};
use panel_core::config::{Config, Environment};
use panel_core::middleware::rate_limit::{client_rate_limiter, route_rate_limiter};
use std::sync::Arc;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret-at-least-32-characters-long";
pub const TEST_PASSWORD: &str = "correct horse battery staple";

pub fn test_config() -> AdminConfig {
    AdminConfig {
        common: Config { port: 8080 },
        environment: Environment::Dev,
        service_name: "admin-api".to_string(),
        service_version: "test".to_string(),
        log_level: "error".to_string(),
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 7,
        },
        security: SecurityConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        rate_limit: RateLimitConfig {
            login_attempts: 5,
            login_window_seconds: 900,
            global_ip_limit: 1000,
            global_ip_window_seconds: 60,
        },
    }
}

/// Build application state over a fresh in-memory store.
pub fn test_state(login_attempts: u32) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let config = test_config();
    let jwt = JwtService::new(&config.jwt).expect("Failed to create JWT service");

    let state = AppState::new(
        config,
        store.clone() as Arc<dyn IdentityStore>,
        jwt,
        route_rate_limiter(login_attempts, 60),
        client_rate_limiter(1000, 60),
    );

    (state, store)
}

/// Insert an active user with a known password.
pub fn seed_user(store: &MemoryStore, email: &str) -> User {
    let hash = hash_password(&Password::new(TEST_PASSWORD.to_string()))
        .expect("Failed to hash test password");
    let user = User::new(
        email.to_string(),
        hash.into_string(),
        Some("Test User".to_string()),
    );
    store.add_user(user.clone());
    user
}

/// Insert a role carrying the given (resource, action) permissions and
/// assign it to the user.
pub fn seed_role(
    store: &MemoryStore,
    user_id: Uuid,
    name: &str,
    is_superadmin: bool,
    perms: &[(&str, &str)],
) -> Uuid {
    let role_id = store.add_role(Role::new(name.to_string(), is_superadmin));
    store.assign_role(user_id, role_id);

    for (resource, action) in perms {
        let perm_id = store.add_permission(Permission::new(
            resource.to_string(),
            action.to_string(),
            None,
        ));
        store.grant_permission(role_id, perm_id);
    }

    role_id
}

/// Insert a refresh token record and return its raw opaque value.
pub fn seed_refresh_token(store: &MemoryStore, user_id: Uuid, expires_in_days: i64) -> (String, Uuid) {
    let raw = RefreshToken::generate_opaque();
    let record = RefreshToken::new(user_id, &raw, expires_in_days);
    let token_id = record.token_id;
    store.add_refresh_token(record);
    (raw, token_id)
}

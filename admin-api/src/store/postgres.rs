//! PostgreSQL-backed identity store.

use async_trait::async_trait;
use panel_core::error::AppError;
use sqlx::postgres::PgPool;
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

use super::{IdentityStore, RoleGrant, UserAggregate};
use crate::models::{Permission, RefreshToken, Role, User};

/// PostgreSQL identity store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new store from a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Row shape for the role-permission join.
#[derive(FromRow)]
struct RolePermissionRow {
    role_id: Uuid,
    #[sqlx(flatten)]
    permission: Permission,
}

#[async_trait]
impl IdentityStore for PgStore {
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Database health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!("Database health check failed: {}", e))
            })?;
        Ok(())
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    async fn get_user_with_roles(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserAggregate>, AppError> {
        let user = match self.find_user_by_id(user_id).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        let roles = sqlx::query_as::<_, Role>(
            r#"
            SELECT r.* FROM roles r
            JOIN user_roles ur ON ur.role_id = r.role_id
            WHERE ur.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;

        let role_ids: Vec<Uuid> = roles.iter().map(|r| r.role_id).collect();

        let rows = sqlx::query_as::<_, RolePermissionRow>(
            r#"
            SELECT rp.role_id, p.permission_id, p.resource, p.action, p.description, p.created_utc
            FROM role_permissions rp
            JOIN permissions p ON p.permission_id = rp.permission_id
            WHERE rp.role_id = ANY($1)
            ORDER BY p.resource, p.action
            "#,
        )
        .bind(&role_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;

        let mut by_role: HashMap<Uuid, Vec<Permission>> = HashMap::new();
        for row in rows {
            by_role.entry(row.role_id).or_default().push(row.permission);
        }

        let roles = roles
            .into_iter()
            .map(|role| {
                let permissions = by_role.remove(&role.role_id).unwrap_or_default();
                RoleGrant { role, permissions }
            })
            .collect();

        Ok(Some(UserAggregate { user, roles }))
    }

    async fn insert_refresh_token(&self, token: &RefreshToken) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token_id, user_id, token_hash, expires_utc, created_utc)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(token.token_id)
        .bind(token.user_id)
        .bind(&token.token_hash)
        .bind(token.expires_utc)
        .bind(token.created_utc)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        Ok(())
    }

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, AppError> {
        let token_hash = RefreshToken::hash_token(token);
        sqlx::query_as::<_, RefreshToken>("SELECT * FROM refresh_tokens WHERE token_hash = $1")
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    async fn delete_refresh_token(&self, token_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE token_id = $1")
            .bind(token_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_permissions(&self) -> Result<Vec<Permission>, AppError> {
        sqlx::query_as::<_, Permission>("SELECT * FROM permissions ORDER BY resource, action")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }
}

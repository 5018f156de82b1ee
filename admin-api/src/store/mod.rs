//! Identity store - repository boundary over users, roles, permissions,
//! and refresh tokens.
//!
//! The credential validator and permission resolver only read through
//! this trait; the single write (purging an expired refresh token) is
//! idempotent.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use panel_core::error::AppError;
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::models::{Permission, RefreshToken, Role, User};

/// A role together with its assigned permissions.
#[derive(Debug, Clone)]
pub struct RoleGrant {
    pub role: Role,
    pub permissions: Vec<Permission>,
}

/// A user loaded with all role and permission associations.
#[derive(Debug, Clone)]
pub struct UserAggregate {
    pub user: User,
    pub roles: Vec<RoleGrant>,
}

impl UserAggregate {
    /// Names of all assigned roles.
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|g| g.role.name.clone()).collect()
    }

    /// True if any assigned role carries the superadmin flag.
    pub fn is_superadmin(&self) -> bool {
        self.roles.iter().any(|g| g.role.is_superadmin)
    }

    /// Flattened, de-duplicated "resource.action" keys across all roles.
    pub fn permission_keys(&self) -> BTreeSet<String> {
        self.roles
            .iter()
            .flat_map(|g| g.permissions.iter().map(Permission::key))
            .collect()
    }
}

/// Repository interface for identity data.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Ping the backing store.
    async fn health_check(&self) -> Result<(), AppError>;

    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Load a user together with roles and each role's permissions.
    /// Returns `None` when the user does not exist.
    async fn get_user_with_roles(&self, user_id: Uuid)
        -> Result<Option<UserAggregate>, AppError>;

    async fn insert_refresh_token(&self, token: &RefreshToken) -> Result<(), AppError>;

    /// Look up a refresh token by its raw opaque value.
    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, AppError>;

    /// Delete a refresh token record. Returns `false` when the record
    /// was already gone; racing deletes are a no-op.
    async fn delete_refresh_token(&self, token_id: Uuid) -> Result<bool, AppError>;

    /// All permissions, sorted by (resource, action).
    async fn list_permissions(&self) -> Result<Vec<Permission>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn perm(resource: &str, action: &str) -> Permission {
        Permission::new(resource.to_string(), action.to_string(), None)
    }

    #[test]
    fn permission_keys_deduplicate_across_roles() {
        let user = User::new("a@example.com".to_string(), "hash".to_string(), None);
        let aggregate = UserAggregate {
            user,
            roles: vec![
                RoleGrant {
                    role: Role::new("editor".to_string(), false),
                    permissions: vec![perm("users", "read"), perm("users", "write")],
                },
                RoleGrant {
                    role: Role::new("viewer".to_string(), false),
                    permissions: vec![perm("users", "read")],
                },
            ],
        };

        let keys = aggregate.permission_keys();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains("users.read"));
        assert!(keys.contains("users.write"));
    }

    #[test]
    fn superadmin_flag_is_detected() {
        let user = User::new("a@example.com".to_string(), "hash".to_string(), None);
        let mut aggregate = UserAggregate {
            user,
            roles: vec![RoleGrant {
                role: Role::new("viewer".to_string(), false),
                permissions: vec![],
            }],
        };
        assert!(!aggregate.is_superadmin());

        aggregate.roles.push(RoleGrant {
            role: Role {
                role_id: Uuid::new_v4(),
                name: crate::models::SUPER_ADMIN_ROLE.to_string(),
                is_superadmin: true,
                created_utc: Utc::now(),
            },
            permissions: vec![],
        });
        assert!(aggregate.is_superadmin());
    }
}

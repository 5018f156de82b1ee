//! In-memory identity store.
//!
//! Stands in for PostgreSQL in tests, the same way mock services stand
//! in for external dependencies elsewhere in the stack.

use async_trait::async_trait;
use panel_core::error::AppError;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use super::{IdentityStore, RoleGrant, UserAggregate};
use crate::models::{Permission, RefreshToken, Role, User};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    roles: HashMap<Uuid, Role>,
    permissions: HashMap<Uuid, Permission>,
    user_roles: Vec<(Uuid, Uuid)>,
    role_permissions: Vec<(Uuid, Uuid)>,
    refresh_tokens: HashMap<Uuid, RefreshToken>,
}

/// In-memory identity store.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: User) -> Uuid {
        let id = user.user_id;
        self.write().users.insert(id, user);
        id
    }

    pub fn add_role(&self, role: Role) -> Uuid {
        let id = role.role_id;
        self.write().roles.insert(id, role);
        id
    }

    pub fn add_permission(&self, permission: Permission) -> Uuid {
        let id = permission.permission_id;
        self.write().permissions.insert(id, permission);
        id
    }

    pub fn assign_role(&self, user_id: Uuid, role_id: Uuid) {
        self.write().user_roles.push((user_id, role_id));
    }

    pub fn grant_permission(&self, role_id: Uuid, permission_id: Uuid) {
        self.write().role_permissions.push((role_id, permission_id));
    }

    pub fn add_refresh_token(&self, token: RefreshToken) -> Uuid {
        let id = token.token_id;
        self.write().refresh_tokens.insert(id, token);
        id
    }

    pub fn set_user_active(&self, user_id: Uuid, active: bool) {
        if let Some(user) = self.write().users.get_mut(&user_id) {
            user.is_active = active;
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().expect("store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().expect("store lock poisoned")
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.read().users.get(&user_id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .read()
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn get_user_with_roles(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserAggregate>, AppError> {
        let inner = self.read();

        let user = match inner.users.get(&user_id) {
            Some(user) => user.clone(),
            None => return Ok(None),
        };

        let mut roles: Vec<RoleGrant> = inner
            .user_roles
            .iter()
            .filter(|(uid, _)| *uid == user_id)
            .filter_map(|(_, rid)| inner.roles.get(rid))
            .map(|role| {
                let mut permissions: Vec<Permission> = inner
                    .role_permissions
                    .iter()
                    .filter(|(rid, _)| *rid == role.role_id)
                    .filter_map(|(_, pid)| inner.permissions.get(pid))
                    .cloned()
                    .collect();
                permissions.sort_by(|a, b| (&a.resource, &a.action).cmp(&(&b.resource, &b.action)));
                RoleGrant {
                    role: role.clone(),
                    permissions,
                }
            })
            .collect();
        roles.sort_by(|a, b| a.role.name.cmp(&b.role.name));

        Ok(Some(UserAggregate { user, roles }))
    }

    async fn insert_refresh_token(&self, token: &RefreshToken) -> Result<(), AppError> {
        self.write()
            .refresh_tokens
            .insert(token.token_id, token.clone());
        Ok(())
    }

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, AppError> {
        let token_hash = RefreshToken::hash_token(token);
        Ok(self
            .read()
            .refresh_tokens
            .values()
            .find(|t| t.token_hash == token_hash)
            .cloned())
    }

    async fn delete_refresh_token(&self, token_id: Uuid) -> Result<bool, AppError> {
        Ok(self.write().refresh_tokens.remove(&token_id).is_some())
    }

    async fn list_permissions(&self) -> Result<Vec<Permission>, AppError> {
        let mut permissions: Vec<Permission> = self.read().permissions.values().cloned().collect();
        permissions.sort_by(|a, b| (&a.resource, &a.action).cmp(&(&b.resource, &b.action)));
        Ok(permissions)
    }
}

//! Permission resolution - effective permission sets and point queries.

use panel_core::error::AppError;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::Permission;
use crate::store::IdentityStore;

#[derive(Clone)]
pub struct PermissionService {
    store: Arc<dyn IdentityStore>,
}

impl PermissionService {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    /// The de-duplicated union of "resource.action" keys across all of
    /// the user's roles. A user with no roles, or a non-existent user,
    /// resolves to an empty set rather than an error.
    pub async fn effective_permissions(
        &self,
        user_id: Uuid,
    ) -> Result<BTreeSet<String>, AppError> {
        let aggregate = match self.store.get_user_with_roles(user_id).await? {
            Some(aggregate) => aggregate,
            None => return Ok(BTreeSet::new()),
        };

        Ok(aggregate.permission_keys())
    }

    /// Point query: does the user hold the given "resource.action" key?
    ///
    /// A superadmin role grants everything; the flag is checked before
    /// flattening the permission set. A non-existent user resolves to
    /// `false`.
    pub async fn has_permission(&self, user_id: Uuid, key: &str) -> Result<bool, AppError> {
        let aggregate = match self.store.get_user_with_roles(user_id).await? {
            Some(aggregate) => aggregate,
            None => return Ok(false),
        };

        if aggregate.is_superadmin() {
            return Ok(true);
        }

        Ok(aggregate.permission_keys().contains(key))
    }

    /// All registered permissions, sorted by (resource, action).
    pub async fn list_all(&self) -> Result<Vec<Permission>, AppError> {
        self.store.list_permissions().await
    }

    /// All permissions grouped by resource, sorted order preserved
    /// within each group.
    pub async fn list_grouped(&self) -> Result<BTreeMap<String, Vec<Permission>>, AppError> {
        let mut grouped: BTreeMap<String, Vec<Permission>> = BTreeMap::new();
        for permission in self.store.list_permissions().await? {
            grouped
                .entry(permission.resource.clone())
                .or_default()
                .push(permission);
        }
        Ok(grouped)
    }
}

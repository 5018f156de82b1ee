//! Role model - named roles with permission assignments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Name of the seeded superadmin role. The bypass itself keys off the
/// `is_superadmin` flag, not this name.
pub const SUPER_ADMIN_ROLE: &str = "SUPER_ADMIN";

/// Role entity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    pub role_id: Uuid,
    pub name: String,
    pub is_superadmin: bool,
    pub created_utc: DateTime<Utc>,
}

impl Role {
    /// Create a new role.
    pub fn new(name: String, is_superadmin: bool) -> Self {
        Self {
            role_id: Uuid::new_v4(),
            name,
            is_superadmin,
            created_utc: Utc::now(),
        }
    }
}

/// User-to-role assignment.
#[derive(Debug, Clone, FromRow)]
pub struct UserRole {
    pub user_id: Uuid,
    pub role_id: Uuid,
}

/// Role-to-permission assignment.
#[derive(Debug, Clone, FromRow)]
pub struct RolePermission {
    pub role_id: Uuid,
    pub permission_id: Uuid,
}

//! Permission model - (resource, action) capability registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Permission entity. `(resource, action)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Permission {
    pub permission_id: Uuid,
    pub resource: String,
    pub action: String,
    pub description: Option<String>,
    pub created_utc: DateTime<Utc>,
}

impl Permission {
    /// Create a new permission.
    pub fn new(resource: String, action: String, description: Option<String>) -> Self {
        Self {
            permission_id: Uuid::new_v4(),
            resource,
            action,
            description,
            created_utc: Utc::now(),
        }
    }

    /// The flattened "resource.action" key used in principals and
    /// authorization checks.
    pub fn key(&self) -> String {
        format!("{}.{}", self.resource, self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_joins_resource_and_action() {
        let perm = Permission::new("users".to_string(), "read".to_string(), None);
        assert_eq!(perm.key(), "users.read");
    }
}

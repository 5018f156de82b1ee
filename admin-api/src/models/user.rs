//! User model - panel accounts with role assignments.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// User entity.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub password_hash: String,
    pub is_active: bool,
    pub created_utc: DateTime<Utc>,
}

impl User {
    /// Create a new active user.
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            email,
            display_name,
            avatar_url: None,
            password_hash,
            is_active: true,
            created_utc: Utc::now(),
        }
    }

    /// Convert to sanitized response (no credential fields).
    pub fn sanitized(&self) -> UserResponse {
        UserResponse::from(self.clone())
    }
}

/// User response for API (without sensitive fields).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub created_utc: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            user_id: u.user_id,
            email: u.email,
            display_name: u.display_name,
            avatar_url: u.avatar_url,
            is_active: u.is_active,
            created_utc: u.created_utc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_is_active() {
        let user = User::new("admin@example.com".to_string(), "hash".to_string(), None);
        assert!(user.is_active);
    }

    #[test]
    fn sanitized_response_has_no_credentials() {
        let user = User::new(
            "admin@example.com".to_string(),
            "hash".to_string(),
            Some("Admin".to_string()),
        );
        let res = user.sanitized();
        let json = serde_json::to_value(&res).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "admin@example.com");
    }
}

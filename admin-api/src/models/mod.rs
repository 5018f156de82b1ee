pub mod permission;
pub mod refresh_token;
pub mod role;
pub mod user;

pub use permission::Permission;
pub use refresh_token::RefreshToken;
pub use role::{Role, RolePermission, UserRole, SUPER_ADMIN_ROLE};
pub use user::{User, UserResponse};

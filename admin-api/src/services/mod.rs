//! Services layer for the admin panel backend.
//!
//! Provides credential validation, permission resolution, and the
//! session flow on top of the identity store.

mod auth;
mod credentials;
pub mod error;
mod jwt;
mod permissions;

pub use auth::{AuthService, SessionTokens, TokenResponse};
pub use credentials::{CredentialService, Principal, RefreshPrincipal};
pub use error::ServiceError;
pub use jwt::{AccessTokenClaims, JwtService};
pub use permissions::PermissionService;

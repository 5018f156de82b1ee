pub mod gatekeeper;

pub use gatekeeper::{gatekeeper_middleware, REFRESH_TOKEN_COOKIE};

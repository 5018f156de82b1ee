//! HTTP handlers for the admin panel backend.

pub mod auth;
pub mod permission;
pub mod user;

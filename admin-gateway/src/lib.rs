pub mod config;
pub mod handlers;
pub mod middleware;
pub mod startup;

pub use startup::build_router;

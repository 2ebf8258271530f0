pub mod app;
pub mod assessment;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod session;

// Re-export key functions for convenience
pub use app::{AppState, create_app, init_tracing, router};

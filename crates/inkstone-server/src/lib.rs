// ABOUTME: HTTP server for inkstone, serving the blog UI over Axum and Askama.
// ABOUTME: Wires the session, auth layer, and routes around shared application state.

pub mod app_state;
pub mod auth;
pub mod config;
pub mod routes;
pub mod session;
pub mod web;

pub use app_state::{AppState, SharedState};
pub use auth::AuthContext;
pub use config::InkstoneConfig;
pub use routes::create_router;
pub use session::BlogSession;

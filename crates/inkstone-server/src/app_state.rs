// ABOUTME: Shared application state for the inkstone HTTP server.
// ABOUTME: Bundles the blog session and auth context for all Axum handlers.

use std::sync::Arc;

use inkstone_store::PostStore;

use crate::auth::AuthContext;
use crate::session::BlogSession;

/// Shared application state accessible by all Axum handlers.
pub struct AppState {
    pub session: BlogSession,
    pub auth: AuthContext,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Create a new AppState over the given persistence adapter and auth context.
    pub fn new(store: PostStore, auth: AuthContext) -> Self {
        Self {
            session: BlogSession::new(store),
            auth,
        }
    }
}

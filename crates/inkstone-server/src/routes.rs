// ABOUTME: Route definitions for the inkstone web UI and health check.
// ABOUTME: Assembles all routes into a single Axum Router behind the auth layer.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::app_state::SharedState;
use crate::auth::AuthLayer;
use crate::web;

/// Build the complete Axum router with all routes and shared state.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(web::index))
        .route("/login", get(web::login_form).post(web::login))
        .route("/logout", post(web::logout))
        .route("/write", get(web::editor))
        .route("/web/posts", get(web::post_list).post(web::create_post))
        .route(
            "/web/posts/{id}",
            get(web::view_post).put(web::update_post).delete(web::delete_post),
        )
        .route("/web/posts/{id}/edit", get(web::edit_post_form))
        .layer(AuthLayer::new(state.auth.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler. Returns 200 OK with a simple JSON body.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

//! API module
//!
//! Contains HTTP request handlers for film and user endpoints and the route
//! table that wires them up.

pub mod extract;
pub mod films;
pub mod users;

use crate::state::AppState;
use axum::{
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Crate version
    pub version: String,
}

/// GET /health - Liveness check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the route table over the shared application state
///
/// Middleware layers are added by the binary.
pub fn router(state: Arc<RwLock<AppState>>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Films
        .route(
            "/films",
            get(films::list_films)
                .post(films::create_film)
                .put(films::update_film),
        )
        .route("/films/popular", get(films::popular_films))
        .route(
            "/films/:id",
            get(films::get_film).put(films::update_film_by_id),
        )
        .route(
            "/films/:id/like/:user_id",
            put(films::add_like).delete(films::remove_like),
        )
        // Users
        .route(
            "/users",
            get(users::list_users)
                .post(users::create_user)
                .put(users::update_user),
        )
        .route(
            "/users/:id",
            get(users::get_user).put(users::update_user_by_id),
        )
        .route("/users/:id/friends", get(users::list_friends))
        .route(
            "/users/:id/friends/:friend_id",
            put(users::add_friend).delete(users::delete_friend),
        )
        .route(
            "/users/:id/friends/common/:other_id",
            get(users::common_friends),
        )
        .with_state(state)
}

//! User API handlers
//!
//! Contains HTTP request handlers for user CRUD and friendships.

use crate::api::extract::{AppJson, AppPath};
use crate::error::AppError;
use crate::services::UserService;
use crate::state::{AppState, User, UserId, UserRequest};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
    /// Status indicator (e.g., "ok")
    pub status: String,
}

/// GET /users - List all users
pub async fn list_users(State(state): State<Arc<RwLock<AppState>>>) -> Json<Vec<User>> {
    info!("Request for all users");
    let state = state.read().await;
    Json(UserService::get_users(&state))
}

/// GET /users/:id - Get a specific user
pub async fn get_user(
    State(state): State<Arc<RwLock<AppState>>>,
    AppPath(id): AppPath<UserId>,
) -> Result<Json<User>, AppError> {
    info!(user_id = id, "Request for user");
    let state = state.read().await;
    Ok(Json(UserService::get_user(&state, id)?))
}

/// POST /users - Create a new user
pub async fn create_user(
    State(state): State<Arc<RwLock<AppState>>>,
    AppJson(request): AppJson<UserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    info!("Request to create user");
    let mut state = state.write().await;
    let user = UserService::create(&mut state, request)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /users - Update the user identified by the `id` in the body
pub async fn update_user(
    State(state): State<Arc<RwLock<AppState>>>,
    AppJson(request): AppJson<UserRequest>,
) -> Result<Json<User>, AppError> {
    let id = request
        .id
        .ok_or_else(|| AppError::Validation("User id is required for update".to_string()))?;
    info!(user_id = id, "Request to update user");
    let mut state = state.write().await;
    Ok(Json(UserService::update(&mut state, id, request)?))
}

/// PUT /users/:id - Update a specific user; any id in the body is ignored
pub async fn update_user_by_id(
    State(state): State<Arc<RwLock<AppState>>>,
    AppPath(id): AppPath<UserId>,
    AppJson(request): AppJson<UserRequest>,
) -> Result<Json<User>, AppError> {
    info!(user_id = id, "Request to update user");
    let mut state = state.write().await;
    Ok(Json(UserService::update(&mut state, id, request)?))
}

/// PUT /users/:id/friends/:friend_id - Add a friend
pub async fn add_friend(
    State(state): State<Arc<RwLock<AppState>>>,
    AppPath((id, friend_id)): AppPath<(UserId, UserId)>,
) -> Result<Json<MessageResponse>, AppError> {
    info!(user_id = id, friend_id, "Request to add friend");
    let mut state = state.write().await;
    UserService::add_friend(&mut state, id, friend_id)?;
    Ok(Json(MessageResponse {
        message: format!("Users {} and {} are now friends", id, friend_id),
        status: "ok".to_string(),
    }))
}

/// DELETE /users/:id/friends/:friend_id - Remove a friend
pub async fn delete_friend(
    State(state): State<Arc<RwLock<AppState>>>,
    AppPath((id, friend_id)): AppPath<(UserId, UserId)>,
) -> Result<StatusCode, AppError> {
    info!(user_id = id, friend_id, "Request to remove friend");
    let mut state = state.write().await;
    UserService::delete_friend(&mut state, id, friend_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /users/:id/friends - List a user's friends
pub async fn list_friends(
    State(state): State<Arc<RwLock<AppState>>>,
    AppPath(id): AppPath<UserId>,
) -> Result<Json<Vec<User>>, AppError> {
    info!(user_id = id, "Request for friends");
    let state = state.read().await;
    Ok(Json(UserService::get_friends(&state, id)?))
}

/// GET /users/:id/friends/common/:other_id - Friends shared by two users
pub async fn common_friends(
    State(state): State<Arc<RwLock<AppState>>>,
    AppPath((id, other_id)): AppPath<(UserId, UserId)>,
) -> Result<Json<Vec<User>>, AppError> {
    info!(user_id = id, other_id, "Request for common friends");
    let state = state.read().await;
    Ok(Json(UserService::get_common_friends(&state, id, other_id)?))
}

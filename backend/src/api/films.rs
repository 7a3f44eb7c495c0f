//! Film API handlers
//!
//! Contains HTTP request handlers for film CRUD, likes, and popularity.

use crate::api::extract::{AppJson, AppPath, AppQuery};
use crate::error::AppError;
use crate::services::FilmService;
use crate::state::{AppState, Film, FilmId, FilmRequest, UserId};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Query parameters for the popular films ranking
#[derive(Debug, Default, Deserialize)]
pub struct PopularQuery {
    /// Maximum number of films to return (must be positive)
    pub count: Option<i64>,
}

/// GET /films - List all films
pub async fn list_films(State(state): State<Arc<RwLock<AppState>>>) -> Json<Vec<Film>> {
    info!("Request for all films");
    let state = state.read().await;
    Json(FilmService::get_films(&state))
}

/// GET /films/:id - Get a specific film
pub async fn get_film(
    State(state): State<Arc<RwLock<AppState>>>,
    AppPath(id): AppPath<FilmId>,
) -> Result<Json<Film>, AppError> {
    info!(film_id = id, "Request for film");
    let state = state.read().await;
    Ok(Json(FilmService::get_film(&state, id)?))
}

/// POST /films - Create a new film
pub async fn create_film(
    State(state): State<Arc<RwLock<AppState>>>,
    AppJson(request): AppJson<FilmRequest>,
) -> Result<(StatusCode, Json<Film>), AppError> {
    info!("Request to create film");
    let mut state = state.write().await;
    let film = FilmService::create(&mut state, request)?;
    Ok((StatusCode::CREATED, Json(film)))
}

/// PUT /films - Update the film identified by the `id` in the body
pub async fn update_film(
    State(state): State<Arc<RwLock<AppState>>>,
    AppJson(request): AppJson<FilmRequest>,
) -> Result<Json<Film>, AppError> {
    let id = request
        .id
        .ok_or_else(|| AppError::Validation("Film id is required for update".to_string()))?;
    info!(film_id = id, "Request to update film");
    let mut state = state.write().await;
    Ok(Json(FilmService::update(&mut state, id, request)?))
}

/// PUT /films/:id - Update a specific film; any id in the body is ignored
pub async fn update_film_by_id(
    State(state): State<Arc<RwLock<AppState>>>,
    AppPath(id): AppPath<FilmId>,
    AppJson(request): AppJson<FilmRequest>,
) -> Result<Json<Film>, AppError> {
    info!(film_id = id, "Request to update film");
    let mut state = state.write().await;
    Ok(Json(FilmService::update(&mut state, id, request)?))
}

/// PUT /films/:id/like/:user_id - Like a film
pub async fn add_like(
    State(state): State<Arc<RwLock<AppState>>>,
    AppPath((id, user_id)): AppPath<(FilmId, UserId)>,
) -> Result<Json<Film>, AppError> {
    info!(film_id = id, user_id, "Request to like film");
    let mut state = state.write().await;
    Ok(Json(FilmService::add_like(&mut state, id, user_id)?))
}

/// DELETE /films/:id/like/:user_id - Remove a like from a film
pub async fn remove_like(
    State(state): State<Arc<RwLock<AppState>>>,
    AppPath((id, user_id)): AppPath<(FilmId, UserId)>,
) -> Result<Json<Film>, AppError> {
    info!(film_id = id, user_id, "Request to remove like from film");
    let mut state = state.write().await;
    Ok(Json(FilmService::remove_like(&mut state, id, user_id)?))
}

/// GET /films/popular?count=N - Most liked films
pub async fn popular_films(
    State(state): State<Arc<RwLock<AppState>>>,
    AppQuery(query): AppQuery<PopularQuery>,
) -> Result<Json<Vec<Film>>, AppError> {
    let state = state.read().await;
    let count = query
        .count
        .unwrap_or_else(|| i64::try_from(state.popular_default_count).unwrap_or(i64::MAX));
    info!(count, "Request for popular films");
    Ok(Json(FilmService::most_popular(&state, count)?))
}

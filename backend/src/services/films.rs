//! Film service
//!
//! Creates and updates films, manages likes, and ranks films by popularity.

use crate::error::AppError;
use crate::services::{lookup::Lookup, today};
use crate::state::{AppState, Film, FilmId, FilmRequest, UserId};
use tracing::{debug, warn};

/// Film service
pub struct FilmService;

impl FilmService {
    /// All films
    pub fn get_films(state: &AppState) -> Vec<Film> {
        state.films.get_all()
    }

    /// A single film, or `NotFound`
    pub fn get_film(state: &AppState, id: FilmId) -> Result<Film, AppError> {
        Lookup::film(state, id)
    }

    /// Validate and store a new film
    ///
    /// The id is assigned only after validation succeeds, so rejected
    /// payloads never consume an id.
    pub fn create(state: &mut AppState, request: FilmRequest) -> Result<Film, AppError> {
        let mut film = Self::validate(request)?;
        film.id = state.films.next_id();
        state.films.save(film.clone());
        debug!(film_id = film.id, name = %film.name, "Film created");
        Ok(film)
    }

    /// Overwrite an existing film
    ///
    /// # Arguments
    /// * `id` - Target film; any id in the payload is ignored
    /// * `request` - New field values
    ///
    /// # Returns
    /// * `Ok(Film)` - The stored film; likes are kept
    /// * `Err(AppError::NotFound)` - `id` does not resolve (checked first)
    /// * `Err(AppError::Validation)` - Payload is invalid
    pub fn update(
        state: &mut AppState,
        id: FilmId,
        request: FilmRequest,
    ) -> Result<Film, AppError> {
        let existing = Lookup::film(state, id)?;
        let mut film = Self::validate(request)?;
        film.id = id;
        film.likes = existing.likes;
        state.films.save(film.clone());
        debug!(film_id = id, "Film updated");
        Ok(film)
    }

    /// Record a like; liking twice is a no-op
    pub fn add_like(
        state: &mut AppState,
        film_id: FilmId,
        user_id: UserId,
    ) -> Result<Film, AppError> {
        let mut film = Lookup::film(state, film_id)?;
        Lookup::user(state, user_id)?;

        if film.add_like(user_id) {
            state.films.save(film.clone());
            debug!(film_id, user_id, "Like added");
        } else {
            debug!(film_id, user_id, "Film already liked by user");
        }
        Ok(film)
    }

    /// Remove a like; removing a like that was never given is a no-op
    pub fn remove_like(
        state: &mut AppState,
        film_id: FilmId,
        user_id: UserId,
    ) -> Result<Film, AppError> {
        let mut film = Lookup::film(state, film_id)?;
        Lookup::user(state, user_id)?;

        if film.remove_like(user_id) {
            state.films.save(film.clone());
            debug!(film_id, user_id, "Like removed");
        } else {
            debug!(film_id, user_id, "No like to remove");
        }
        Ok(film)
    }

    /// Films ordered by like count, most liked first, at most `count` of them
    ///
    /// Films with equal like counts are ordered by ascending id.
    pub fn most_popular(state: &AppState, count: i64) -> Result<Vec<Film>, AppError> {
        if count <= 0 {
            warn!(count, "Rejected non-positive popular films count");
            return Err(AppError::Validation(format!(
                "Count must be a positive integer, got {}",
                count
            )));
        }
        let limit = usize::try_from(count).unwrap_or(usize::MAX);

        let mut films = state.films.get_all();
        films.sort_by(|a, b| {
            b.likes_count()
                .cmp(&a.likes_count())
                .then_with(|| a.id.cmp(&b.id))
        });
        films.truncate(limit);
        Ok(films)
    }

    fn validate(request: FilmRequest) -> Result<Film, AppError> {
        request.into_film(today()).map_err(|msg| {
            warn!(reason = %msg, "Film validation failed");
            AppError::Validation(msg)
        })
    }
}

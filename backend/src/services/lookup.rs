//! Id-to-entity resolution
//!
//! Resolves a film or user id against storage, turning a miss into
//! `AppError::NotFound`.

use crate::error::AppError;
use crate::state::{AppState, Entity, Film, FilmId, Storage, User, UserId};

/// Lookup helper shared by the film and user services
pub struct Lookup;

impl Lookup {
    /// Resolve a film id
    ///
    /// # Returns
    /// * `Ok(Film)` - Copy of the stored film
    /// * `Err(AppError::NotFound)` - No film has this id
    pub fn film(state: &AppState, id: FilmId) -> Result<Film, AppError> {
        Self::resolve(&*state.films, id)
    }

    /// Resolve a user id
    ///
    /// # Returns
    /// * `Ok(User)` - Copy of the stored user
    /// * `Err(AppError::NotFound)` - No user has this id
    pub fn user(state: &AppState, id: UserId) -> Result<User, AppError> {
        Self::resolve(&*state.users, id)
    }

    fn resolve<T: Entity>(storage: &dyn Storage<T>, id: u64) -> Result<T, AppError> {
        storage.find_by_id(id).ok_or_else(|| {
            tracing::warn!(kind = T::KIND, id, "Entity not found");
            AppError::NotFound(format!("{} with id={} not found", T::KIND, id))
        })
    }
}

//! Application state management
//! Owns the film and user storages shared by all handlers

use crate::config::{Config, DEFAULT_POPULAR_COUNT};
use crate::state::film::Film;
use crate::state::storage::{InMemoryStorage, Storage};
use crate::state::user::User;

/// Main application state
///
/// Handlers share it as `Arc<RwLock<AppState>>`. Every mutation runs under the
/// write lock for the whole service call, so multi-entity updates (both halves
/// of a friendship) are never observed half-applied.
pub struct AppState {
    /// Film storage
    pub films: Box<dyn Storage<Film>>,
    /// User storage
    pub users: Box<dyn Storage<User>>,
    /// Number of films returned by the popular ranking when no count is given
    pub popular_default_count: usize,
}

impl AppState {
    /// Create an application state with empty in-memory storages
    pub fn new() -> Self {
        Self::with_storage(
            Box::new(InMemoryStorage::new()),
            Box::new(InMemoryStorage::new()),
        )
    }

    /// Create an in-memory application state using values from the config
    pub fn from_config(config: &Config) -> Self {
        Self {
            popular_default_count: config.films.popular_default_count,
            ..Self::new()
        }
    }

    /// Create an application state over the given storages
    pub fn with_storage(films: Box<dyn Storage<Film>>, users: Box<dyn Storage<User>>) -> Self {
        Self {
            films,
            users,
            popular_default_count: DEFAULT_POPULAR_COUNT,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

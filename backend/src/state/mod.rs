//! State management module
//! Handles the entity model, per-type storage, and shared application state

pub mod app_state;
pub mod film;
pub mod storage;
pub mod user;

pub use app_state::AppState;
pub use film::{Film, FilmId, FilmRequest};
pub use storage::{Entity, IdSequence, InMemoryStorage, Storage};
pub use user::{User, UserId, UserRequest};

//! User service
//!
//! Creates and updates users and maintains the friendship graph.
//!
//! Friendship is undirected but stored as two directed entries, one in each
//! user's `friend_ids`. Every operation here writes both entries or neither.

use crate::error::AppError;
use crate::services::{lookup::Lookup, today};
use crate::state::{AppState, User, UserId, UserRequest};
use tracing::{debug, info, warn};

/// User service
pub struct UserService;

impl UserService {
    /// All users
    pub fn get_users(state: &AppState) -> Vec<User> {
        state.users.get_all()
    }

    /// A single user, or `NotFound`
    pub fn get_user(state: &AppState, id: UserId) -> Result<User, AppError> {
        Lookup::user(state, id)
    }

    /// Validate and store a new user, defaulting a blank name to the login
    pub fn create(state: &mut AppState, request: UserRequest) -> Result<User, AppError> {
        let mut user = Self::validate(request)?;
        user.id = state.users.next_id();
        state.users.save(user.clone());
        debug!(user_id = user.id, login = %user.login, "User created");
        Ok(user)
    }

    /// Overwrite an existing user
    ///
    /// `id` is the target; any id in the payload is ignored. Friend ids are
    /// kept so the friendship graph stays symmetric.
    pub fn update(
        state: &mut AppState,
        id: UserId,
        request: UserRequest,
    ) -> Result<User, AppError> {
        let existing = Lookup::user(state, id)?;
        let mut user = Self::validate(request)?;
        user.id = id;
        user.friend_ids = existing.friend_ids;
        state.users.save(user.clone());
        debug!(user_id = id, "User updated");
        Ok(user)
    }

    /// Make two users friends
    ///
    /// # Returns
    /// * `Ok(())` - Both users now list each other as friends
    /// * `Err(AppError::NotFound)` - Either user does not exist
    /// * `Err(AppError::Validation)` - `id == friend_id`, or they are already friends
    pub fn add_friend(state: &mut AppState, id: UserId, friend_id: UserId) -> Result<(), AppError> {
        let mut user = Lookup::user(state, id)?;
        let mut friend = Lookup::user(state, friend_id)?;

        if id == friend_id {
            warn!(user_id = id, "User tried to befriend themselves");
            return Err(AppError::Validation(format!(
                "User with id={} cannot add themselves as a friend",
                id
            )));
        }
        if user.is_friend_of(friend_id) || friend.is_friend_of(id) {
            warn!(user_id = id, friend_id, "Friendship already exists");
            return Err(AppError::Validation(format!(
                "Users with id={} and id={} are already friends",
                id, friend_id
            )));
        }

        user.friend_ids.insert(friend_id);
        friend.friend_ids.insert(id);
        state.users.save(user);
        state.users.save(friend);
        debug!(user_id = id, friend_id, "Users are now friends");
        Ok(())
    }

    /// End a friendship; a missing friendship is a silent no-op
    pub fn delete_friend(
        state: &mut AppState,
        id: UserId,
        friend_id: UserId,
    ) -> Result<(), AppError> {
        let mut user = Lookup::user(state, id)?;
        let mut friend = Lookup::user(state, friend_id)?;

        let removed = user.friend_ids.remove(&friend_id) | friend.friend_ids.remove(&id);
        if !removed {
            debug!(user_id = id, friend_id, "No friendship to remove");
            return Ok(());
        }

        state.users.save(user);
        state.users.save(friend);
        debug!(user_id = id, friend_id, "Users are no longer friends");
        Ok(())
    }

    /// Friends of a user, ascending by id
    pub fn get_friends(state: &AppState, id: UserId) -> Result<Vec<User>, AppError> {
        let user = Lookup::user(state, id)?;
        let friends = Self::resolve_all(state, user.friend_ids.iter().copied())?;
        debug!(user_id = id, count = friends.len(), "Resolved friends");
        Ok(friends)
    }

    /// Users who are friends of both `id` and `other_id`
    ///
    /// # Returns
    /// * `Ok(Vec<User>)` - Common friends ascending by id; empty if none
    /// * `Err(AppError::Validation)` - `id == other_id`
    /// * `Err(AppError::NotFound)` - Either user does not exist
    pub fn get_common_friends(
        state: &AppState,
        id: UserId,
        other_id: UserId,
    ) -> Result<Vec<User>, AppError> {
        if id == other_id {
            warn!(user_id = id, "Common friends requested for a user with themselves");
            return Err(AppError::Validation(format!(
                "Cannot compute common friends of user id={} with themselves",
                id
            )));
        }
        let user = Lookup::user(state, id)?;
        let other = Lookup::user(state, other_id)?;

        let common = Self::resolve_all(state, user.common_friend_ids(&other))?;
        debug!(user_id = id, other_id, count = common.len(), "Resolved common friends");
        Ok(common)
    }

    fn resolve_all(
        state: &AppState,
        ids: impl IntoIterator<Item = UserId>,
    ) -> Result<Vec<User>, AppError> {
        ids.into_iter().map(|id| Lookup::user(state, id)).collect()
    }

    fn validate(request: UserRequest) -> Result<User, AppError> {
        let mut user = request.into_user(today()).map_err(|msg| {
            warn!(reason = %msg, "User validation failed");
            AppError::Validation(msg)
        })?;
        if user.default_name_to_login() {
            info!(login = %user.login, "Using login as display name");
        }
        Ok(user)
    }
}

//! User entity and its request payload

use crate::state::storage::Entity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Unique identifier for a user
pub type UserId = u64;

/// User structure
/// Represents a stored user together with their friend ids
///
/// Friendship is undirected: if `a` is in `b.friend_ids` then `b` is in
/// `a.friend_ids`. `UserService` maintains this; the struct does not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier, assigned on creation
    pub id: UserId,
    /// Contact email
    pub email: String,
    /// Login, no whitespace
    pub login: String,
    /// Display name, defaults to the login
    pub name: String,
    /// Date of birth
    pub birthday: NaiveDate,
    /// Ids of this user's friends
    #[serde(default)]
    pub friend_ids: BTreeSet<UserId>,
}

impl User {
    /// Use the login as display name when the name is blank
    /// Returns true if the name was replaced
    pub fn default_name_to_login(&mut self) -> bool {
        if self.name.trim().is_empty() {
            self.name = self.login.clone();
            true
        } else {
            false
        }
    }

    /// Whether `other` is in this user's friend set
    pub fn is_friend_of(&self, other: UserId) -> bool {
        self.friend_ids.contains(&other)
    }

    /// Ids present in both users' friend sets, ascending
    pub fn common_friend_ids(&self, other: &User) -> Vec<UserId> {
        self.friend_ids
            .intersection(&other.friend_ids)
            .copied()
            .collect()
    }
}

impl Entity for User {
    const KIND: &'static str = "User";

    fn id(&self) -> u64 {
        self.id
    }
}

/// User payload for create and update requests
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRequest {
    /// Target id (only used by `PUT /users`)
    pub id: Option<UserId>,
    /// Contact email
    pub email: Option<String>,
    /// Login
    pub login: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Date of birth
    pub birthday: Option<NaiveDate>,
}

impl UserRequest {
    /// Validate the payload and build an unsaved user (id 0, no friends)
    ///
    /// The name is copied as given; defaulting it to the login is left to
    /// the caller.
    pub fn into_user(self, today: NaiveDate) -> Result<User, String> {
        let email = self.email.unwrap_or_default();
        if email.trim().is_empty() {
            return Err("Email must not be empty".to_string());
        }
        if !email.contains('@') {
            return Err(format!("Email '{}' must contain '@'", email));
        }

        let login = self.login.unwrap_or_default();
        if login.is_empty() {
            return Err("Login must not be empty".to_string());
        }
        if login.chars().any(char::is_whitespace) {
            return Err("Login must not contain whitespace".to_string());
        }

        let birthday = self
            .birthday
            .ok_or_else(|| "Birthday is required".to_string())?;
        if birthday > today {
            return Err(format!("Birthday {} must not be in the future", birthday));
        }

        Ok(User {
            id: 0,
            email,
            login,
            name: self.name.unwrap_or_default(),
            birthday,
            friend_ids: BTreeSet::new(),
        })
    }
}

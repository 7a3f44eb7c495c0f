//! Film entity and its request payload

use crate::state::storage::Entity;
use crate::state::user::UserId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Unique identifier for a film
pub type FilmId = u64;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Date of the first public film screening; no film can be released earlier
pub fn earliest_release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1895, 12, 28).unwrap_or(NaiveDate::MIN)
}

/// Film structure
/// Represents a stored film together with the set of users who liked it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    /// Unique identifier, assigned on creation
    pub id: FilmId,
    /// Film title
    pub name: String,
    /// Short description (at most 200 characters)
    pub description: String,
    /// Release date, never earlier than 1895-12-28
    pub release_date: NaiveDate,
    /// Duration in minutes
    pub duration: f64,
    /// Ids of users who liked the film
    #[serde(default)]
    pub likes: BTreeSet<UserId>,
}

impl Film {
    /// Record a like from the given user
    /// Returns false if the user had already liked the film
    pub fn add_like(&mut self, user_id: UserId) -> bool {
        self.likes.insert(user_id)
    }

    /// Remove a like from the given user
    /// Returns false if there was no like to remove
    pub fn remove_like(&mut self, user_id: UserId) -> bool {
        self.likes.remove(&user_id)
    }

    /// Number of likes, the popularity key
    pub fn likes_count(&self) -> usize {
        self.likes.len()
    }
}

impl Entity for Film {
    const KIND: &'static str = "Film";

    fn id(&self) -> u64 {
        self.id
    }
}

/// Film payload for create and update requests
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation error naming that field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilmRequest {
    /// Target id (only used by `PUT /films`)
    pub id: Option<FilmId>,
    /// Film title
    pub name: Option<String>,
    /// Short description
    pub description: Option<String>,
    /// Release date
    pub release_date: Option<NaiveDate>,
    /// Duration in minutes
    pub duration: Option<f64>,
}

impl FilmRequest {
    /// Validate the payload and build an unsaved film (id 0, no likes)
    ///
    /// # Arguments
    /// * `today` - Latest acceptable release date
    ///
    /// # Returns
    /// * `Ok(Film)` - Film ready for id assignment
    /// * `Err(String)` - Message naming the offending field
    pub fn into_film(self, today: NaiveDate) -> Result<Film, String> {
        let name = self.name.unwrap_or_default();
        if name.trim().is_empty() {
            return Err("Film name must not be empty".to_string());
        }

        let description = self.description.unwrap_or_default();
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(format!(
                "Film description must not exceed {} characters",
                MAX_DESCRIPTION_LENGTH
            ));
        }

        let release_date = self
            .release_date
            .ok_or_else(|| "Film release date is required".to_string())?;
        if release_date < earliest_release_date() || release_date > today {
            return Err(format!(
                "Film release date {} must be between {} and {}",
                release_date,
                earliest_release_date(),
                today
            ));
        }

        let duration = match self.duration {
            Some(minutes) if minutes.is_finite() && minutes > 0.0 => minutes,
            _ => return Err("Film duration must be positive".to_string()),
        };

        Ok(Film {
            id: 0,
            name,
            description,
            release_date,
            duration,
            likes: BTreeSet::new(),
        })
    }
}

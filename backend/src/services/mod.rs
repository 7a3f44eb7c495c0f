//! Service layer for business logic
//!
//! This module contains the film and user services that separate business
//! logic from HTTP handlers, making the code more modular and testable.

pub mod films;
pub mod lookup;
pub mod users;

pub use films::FilmService;
pub use lookup::Lookup;
pub use users::UserService;

use chrono::NaiveDate;

/// Current local date, the upper bound for release dates and birthdays
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

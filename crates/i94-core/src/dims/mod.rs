//! Dimension table builders.
//!
//! One module per dimension. Surrogate keys are 1-based row indexes
//! assigned after a deterministic sort on the natural key, so repeated
//! runs over identical input produce identical keys.

pub mod airport;
pub mod calendar;
pub mod country;
pub mod demographics;

pub use airport::build_airport_dim;
pub use calendar::build_calendar_dim;
pub use country::build_country_dim;
pub use demographics::build_demographics_dim;

//! `serieshub-catalog` — record services for the two managed record kinds.
//!
//! Storage is in-memory (lock-guarded maps). Authorization never happens
//! here: callers reach these services only after the request has passed the
//! policy guard.

pub mod series;
pub mod users;

pub use series::{CreateSeries, Series, SeriesStore, UpdateSeries};
pub use users::{CreateUserAccount, UpdateUserAccount, UserAccount, UserStore};

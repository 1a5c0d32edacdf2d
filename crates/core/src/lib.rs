//! Pure scheduling domain logic for the fahrplan driving-school backend.
//!
//! This crate has no I/O and no async: everything here is deterministic
//! calendar arithmetic, interval math, and lifecycle validation. The `db`
//! and `api` crates build on top of it.

pub mod availability;
pub mod calendar;
pub mod error;
pub mod lesson;
pub mod recurrence;
pub mod time_range;
pub mod types;

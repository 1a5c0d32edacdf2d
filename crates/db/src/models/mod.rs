//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the writes the API accepts

pub mod blocked_slot;
pub mod lesson;
pub mod lesson_action;
pub mod lesson_type;
pub mod user;
pub mod working_hours;

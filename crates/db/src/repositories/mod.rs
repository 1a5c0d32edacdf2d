//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod blocked_slot_repo;
pub mod lesson_action_repo;
pub mod lesson_repo;
pub mod lesson_type_repo;
pub mod user_repo;
pub mod working_hours_repo;

pub use blocked_slot_repo::BlockedSlotRepo;
pub use lesson_action_repo::LessonActionRepo;
pub use lesson_repo::LessonRepo;
pub use lesson_type_repo::LessonTypeRepo;
pub use user_repo::UserRepo;
pub use working_hours_repo::WorkingHoursRepo;

pub mod availability;
pub mod blocked_slots;
pub mod lessons;
pub mod profile;
pub mod working_hours;

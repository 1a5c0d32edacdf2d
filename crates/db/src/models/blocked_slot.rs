//! Blocked-slot entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fahrplan_core::error::CoreError;
use fahrplan_core::recurrence::Repeat;
use fahrplan_core::time_range::TimeRange;
use fahrplan_core::types::{DbId, Timestamp};

/// A row from the `blocked_slots` table: one instructor-defined
/// unavailable span, optionally recurring.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlockedSlot {
    pub id: DbId,
    pub instructor_id: DbId,
    pub name: Option<String>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub repeat: String,
    pub created_at: Timestamp,
}

impl BlockedSlot {
    /// Parse the stored repeat rule (guarded by a CHECK constraint).
    pub fn repeat(&self) -> Result<Repeat, CoreError> {
        Repeat::from_str(&self.repeat)
    }

    /// The span of the first occurrence.
    pub fn span(&self) -> Result<TimeRange, CoreError> {
        TimeRange::new(self.start_date, self.end_date)
    }
}

/// DTO for creating a blocked slot via `POST /api/v1/blocked-slots`.
#[derive(Debug, Deserialize)]
pub struct CreateBlockedSlot {
    pub instructor_id: DbId,
    pub name: Option<String>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub repeat: String,
}

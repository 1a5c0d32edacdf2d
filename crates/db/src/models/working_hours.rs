//! Instructor working-hours configuration.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fahrplan_core::availability::DayWindow;
use fahrplan_core::error::CoreError;
use fahrplan_core::types::DbId;

/// A row from the `working_hours` table. `weekday` is 0 = Monday through
/// 6 = Sunday, matching `chrono::Weekday`'s days-from-Monday numbering.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkingHours {
    pub id: DbId,
    pub instructor_id: DbId,
    pub weekday: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl WorkingHours {
    /// Convert to the core calculator's window type.
    pub fn day_window(&self) -> Result<DayWindow, CoreError> {
        let weekday = u8::try_from(self.weekday)
            .ok()
            .and_then(|d| Weekday::try_from(d).ok())
            .ok_or_else(|| {
                CoreError::Validation(format!("Invalid weekday: {}", self.weekday))
            })?;
        Ok(DayWindow {
            weekday,
            start: self.start_time,
            end: self.end_time,
        })
    }
}

/// One weekday's window in a `PUT /working-hours` replacement.
#[derive(Debug, Deserialize)]
pub struct UpsertWorkingHours {
    pub weekday: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

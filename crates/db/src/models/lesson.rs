//! Driving lesson entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fahrplan_core::error::CoreError;
use fahrplan_core::lesson::LessonStatus;
use fahrplan_core::time_range::TimeRange;
use fahrplan_core::types::{DbId, Timestamp};

/// A row from the `driving_lessons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DrivingLesson {
    pub id: DbId,
    pub student_id: DbId,
    pub instructor_id: DbId,
    pub lesson_type_id: DbId,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub status: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DrivingLesson {
    /// Parse the stored status string (guarded by a CHECK constraint).
    pub fn status(&self) -> Result<LessonStatus, CoreError> {
        LessonStatus::from_str(&self.status)
    }

    /// The lesson's occupied span. `start_at < end_at` is a table CHECK.
    pub fn time_range(&self) -> Result<TimeRange, CoreError> {
        TimeRange::new(self.start_at, self.end_at)
    }
}

/// A lesson joined with its student and pickup data, for the instructor's
/// day view. Produced by a single JOIN query, not per-lesson fetches.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LessonWithStudent {
    pub id: DbId,
    pub student_id: DbId,
    pub instructor_id: DbId,
    pub lesson_type_id: DbId,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub status: String,
    pub description: Option<String>,
    pub student_first_name: String,
    pub student_last_name: String,
    pub student_phone: Option<String>,
    pub pickup_address: Option<String>,
    pub pickup_lat: Option<f64>,
    pub pickup_lng: Option<f64>,
}

/// DTO for requesting a lesson via `POST /api/v1/lessons`.
#[derive(Debug, Deserialize)]
pub struct RequestLesson {
    pub student_id: DbId,
    pub instructor_id: DbId,
    pub lesson_type_id: DbId,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub description: Option<String>,
}

/// One entry of a bulk reschedule via `POST /api/v1/lessons/shift`.
#[derive(Debug, Deserialize)]
pub struct ShiftLesson {
    pub id: DbId,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
}

/// Query parameters for instructor lesson listings.
#[derive(Debug, Deserialize)]
pub struct InstructorLessonsQuery {
    /// Any instant within the requested day or week. Defaults to now.
    pub date: Option<Timestamp>,
    /// `day` (default) or `week`.
    pub scope: Option<String>,
    /// Optional single-status filter; defaults to the active statuses.
    pub status: Option<String>,
}

/// Query parameters for the student week view.
#[derive(Debug, Deserialize)]
pub struct StudentLessonsQuery {
    /// Any instant within the requested week. Defaults to now.
    pub date: Option<Timestamp>,
}

//! Lesson type catalog.

use serde::Serialize;
use sqlx::FromRow;

use fahrplan_core::types::DbId;

/// A row from the `lesson_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LessonType {
    pub id: DbId,
    pub name: String,
    pub duration_minutes: i32,
}

impl LessonType {
    pub fn duration(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.duration_minutes))
    }
}

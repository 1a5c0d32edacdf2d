//! Append-only lesson audit entries.

use serde::Serialize;
use sqlx::FromRow;

use fahrplan_core::types::{DbId, Timestamp};

/// A row from the `lesson_actions` table. Written exactly once per status
/// transition by `LessonRepo::transition`; never updated or deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LessonAction {
    pub id: DbId,
    pub lesson_id: DbId,
    pub user_id: DbId,
    pub action: String,
    pub created_at: Timestamp,
}

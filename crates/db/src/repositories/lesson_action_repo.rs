//! Read operations for the `lesson_actions` table.
//!
//! Inserts are done by `LessonRepo::transition` to ensure each status
//! change and its audit entry commit together.

use sqlx::PgPool;

use fahrplan_core::types::DbId;

use crate::models::lesson_action::LessonAction;

/// Column list for the `lesson_actions` table.
const COLUMNS: &str = "id, lesson_id, user_id, action, created_at";

/// Read side of the append-only lesson audit log.
pub struct LessonActionRepo;

impl LessonActionRepo {
    /// List all actions for a lesson, ordered chronologically.
    pub async fn list_by_lesson(
        pool: &PgPool,
        lesson_id: DbId,
    ) -> Result<Vec<LessonAction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lesson_actions \
             WHERE lesson_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, LessonAction>(&query)
            .bind(lesson_id)
            .fetch_all(pool)
            .await
    }
}

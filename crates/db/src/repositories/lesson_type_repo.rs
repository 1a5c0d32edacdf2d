//! Repository for the `lesson_types` table.

use sqlx::PgPool;

use fahrplan_core::types::DbId;

use crate::models::lesson_type::LessonType;

/// Column list for the `lesson_types` table.
const COLUMNS: &str = "id, name, duration_minutes";

/// Read operations for the lesson type catalog.
pub struct LessonTypeRepo;

impl LessonTypeRepo {
    /// List all lesson types.
    pub async fn list(pool: &PgPool) -> Result<Vec<LessonType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lesson_types ORDER BY id");
        sqlx::query_as::<_, LessonType>(&query).fetch_all(pool).await
    }

    /// Find a lesson type by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LessonType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lesson_types WHERE id = $1");
        sqlx::query_as::<_, LessonType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

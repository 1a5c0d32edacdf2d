//! Repository for the `blocked_slots` table.

use sqlx::PgPool;

use fahrplan_core::types::DbId;

use crate::models::blocked_slot::{BlockedSlot, CreateBlockedSlot};

/// Column list for the `blocked_slots` table.
const COLUMNS: &str = "id, instructor_id, name, start_date, end_date, repeat, created_at";

/// CRUD for instructor blocked slots.
pub struct BlockedSlotRepo;

impl BlockedSlotRepo {
    /// Insert a new blocked slot.
    pub async fn create(
        pool: &PgPool,
        input: &CreateBlockedSlot,
    ) -> Result<BlockedSlot, sqlx::Error> {
        let query = format!(
            "INSERT INTO blocked_slots (instructor_id, name, start_date, end_date, repeat) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlockedSlot>(&query)
            .bind(input.instructor_id)
            .bind(&input.name)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.repeat)
            .fetch_one(pool)
            .await
    }

    /// List all blocked slots owned by an instructor, oldest first.
    pub async fn list_by_instructor(
        pool: &PgPool,
        instructor_id: DbId,
    ) -> Result<Vec<BlockedSlot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blocked_slots \
             WHERE instructor_id = $1 \
             ORDER BY start_date ASC, id ASC"
        );
        sqlx::query_as::<_, BlockedSlot>(&query)
            .bind(instructor_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a blocked slot, removing all future occurrences with it.
    /// Returns whether a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blocked_slots WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

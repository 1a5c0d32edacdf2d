//! Repository for the `working_hours` table.

use sqlx::PgPool;

use fahrplan_core::types::DbId;

use crate::models::working_hours::{UpsertWorkingHours, WorkingHours};

/// Column list for the `working_hours` table.
const COLUMNS: &str = "id, instructor_id, weekday, start_time, end_time";

/// CRUD for instructor working-hours windows.
pub struct WorkingHoursRepo;

impl WorkingHoursRepo {
    /// List an instructor's working hours, ordered by weekday.
    pub async fn list_by_instructor(
        pool: &PgPool,
        instructor_id: DbId,
    ) -> Result<Vec<WorkingHours>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM working_hours \
             WHERE instructor_id = $1 \
             ORDER BY weekday ASC"
        );
        sqlx::query_as::<_, WorkingHours>(&query)
            .bind(instructor_id)
            .fetch_all(pool)
            .await
    }

    /// Replace an instructor's entire working-hours configuration in one
    /// transaction, returning the new rows.
    pub async fn replace_for_instructor(
        pool: &PgPool,
        instructor_id: DbId,
        windows: &[UpsertWorkingHours],
    ) -> Result<Vec<WorkingHours>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM working_hours WHERE instructor_id = $1")
            .bind(instructor_id)
            .execute(&mut *tx)
            .await?;

        let insert_query = format!(
            "INSERT INTO working_hours (instructor_id, weekday, start_time, end_time) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let mut rows = Vec::with_capacity(windows.len());
        for window in windows {
            let row = sqlx::query_as::<_, WorkingHours>(&insert_query)
                .bind(instructor_id)
                .bind(window.weekday)
                .bind(window.start_time)
                .bind(window.end_time)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok(rows)
    }
}

//! Repository for the `driving_lessons` table and its audit log.
//!
//! Booking and lifecycle writes are transactional: `request` holds a
//! per-instructor advisory lock across its check+insert, `transition`
//! pairs the status update with its `lesson_actions` entry, and `shift`
//! applies a whole batch or nothing.

use sqlx::{PgPool, Postgres, Transaction};

use fahrplan_core::lesson::{LessonStatus, ACTIVE_STATUSES};
use fahrplan_core::recurrence::{expand_occurrences, Repeat};
use fahrplan_core::time_range::TimeRange;
use fahrplan_core::types::DbId;

use crate::models::lesson::{DrivingLesson, LessonWithStudent, RequestLesson, ShiftLesson};

/// Column list for the `driving_lessons` table.
const COLUMNS: &str = "\
    id, student_id, instructor_id, lesson_type_id, start_at, end_at, \
    status, description, created_at, updated_at";

/// Column list for the lesson + student JOIN view.
const JOINED_COLUMNS: &str = "\
    l.id, l.student_id, l.instructor_id, l.lesson_type_id, l.start_at, \
    l.end_at, l.status, l.description, \
    u.first_name AS student_first_name, u.last_name AS student_last_name, \
    u.phone AS student_phone, \
    sd.pickup_address, sd.pickup_lat, sd.pickup_lng";

fn active_statuses() -> Vec<String> {
    ACTIVE_STATUSES.iter().map(|s| s.as_str().to_string()).collect()
}

/// CRUD and lifecycle operations for driving lessons.
pub struct LessonRepo;

impl LessonRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Find a lesson by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DrivingLesson>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM driving_lessons WHERE id = $1");
        sqlx::query_as::<_, DrivingLesson>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a lesson by ID with its student and pickup data in one JOIN.
    pub async fn find_by_id_with_student(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LessonWithStudent>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM driving_lessons l \
             JOIN users u ON u.id = l.student_id \
             LEFT JOIN student_data sd ON sd.user_id = l.student_id \
             WHERE l.id = $1"
        );
        sqlx::query_as::<_, LessonWithStudent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an instructor's lessons within `range` with student data,
    /// ordered by start ascending.
    ///
    /// With `status = None` the active statuses (REQUESTED, CONFIRMED)
    /// are matched via set membership.
    pub async fn list_for_instructor(
        pool: &PgPool,
        instructor_id: DbId,
        range: TimeRange,
        status: Option<LessonStatus>,
    ) -> Result<Vec<LessonWithStudent>, sqlx::Error> {
        let statuses = match status {
            Some(s) => vec![s.as_str().to_string()],
            None => active_statuses(),
        };
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM driving_lessons l \
             JOIN users u ON u.id = l.student_id \
             LEFT JOIN student_data sd ON sd.user_id = l.student_id \
             WHERE l.instructor_id = $1 \
               AND l.start_at >= $2 AND l.start_at < $3 \
               AND l.status = ANY($4) \
             ORDER BY l.start_at ASC, l.id ASC"
        );
        sqlx::query_as::<_, LessonWithStudent>(&query)
            .bind(instructor_id)
            .bind(range.start)
            .bind(range.end)
            .bind(&statuses)
            .fetch_all(pool)
            .await
    }

    /// List a student's active lessons within `range`, ordered by start.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
        range: TimeRange,
    ) -> Result<Vec<DrivingLesson>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM driving_lessons \
             WHERE student_id = $1 \
               AND start_at >= $2 AND start_at < $3 \
               AND status = ANY($4) \
             ORDER BY start_at ASC, id ASC"
        );
        sqlx::query_as::<_, DrivingLesson>(&query)
            .bind(student_id)
            .bind(range.start)
            .bind(range.end)
            .bind(&active_statuses())
            .fetch_all(pool)
            .await
    }

    /// List the active lessons whose spans intersect `range`, as input to
    /// the availability calculator.
    pub async fn list_active_in_range(
        pool: &PgPool,
        instructor_id: DbId,
        range: TimeRange,
    ) -> Result<Vec<DrivingLesson>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM driving_lessons \
             WHERE instructor_id = $1 \
               AND start_at < $3 AND end_at > $2 \
               AND status = ANY($4) \
             ORDER BY start_at ASC, id ASC"
        );
        sqlx::query_as::<_, DrivingLesson>(&query)
            .bind(instructor_id)
            .bind(range.start)
            .bind(range.end)
            .bind(&active_statuses())
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Request (atomic check + insert)
    // -----------------------------------------------------------------------

    /// Request a lesson: overlap check and insert in one transaction.
    ///
    /// A per-instructor advisory lock serializes concurrent requests for
    /// the same instructor so two overlapping requests cannot both pass
    /// the check; the table's exclusion constraint backstops anything
    /// that slips through. Returns `Ok(None)` when the requested span
    /// collides with an active lesson or a blocked-slot occurrence.
    pub async fn request(
        pool: &PgPool,
        input: &RequestLesson,
    ) -> Result<Option<DrivingLesson>, sqlx::Error> {
        let requested = TimeRange {
            start: input.start_at,
            end: input.end_at,
        };

        let mut tx = pool.begin().await?;

        // Serialize with other bookings for this instructor. Released at
        // commit/rollback.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(input.instructor_id)
            .execute(&mut *tx)
            .await?;

        let lesson_clash: bool = sqlx::query_scalar(
            "SELECT EXISTS( \
                SELECT 1 FROM driving_lessons \
                WHERE instructor_id = $1 \
                  AND status = ANY($2) \
                  AND start_at < $4 AND end_at > $3)",
        )
        .bind(input.instructor_id)
        .bind(&active_statuses())
        .bind(requested.start)
        .bind(requested.end)
        .fetch_one(&mut *tx)
        .await?;

        if lesson_clash {
            return Ok(None);
        }

        if Self::blocked_slot_clash(&mut tx, input.instructor_id, requested).await? {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO driving_lessons \
                (student_id, instructor_id, lesson_type_id, start_at, end_at, status, description) \
             VALUES ($1, $2, $3, $4, $5, 'REQUESTED', $6) \
             RETURNING {COLUMNS}"
        );
        let lesson = sqlx::query_as::<_, DrivingLesson>(&query)
            .bind(input.student_id)
            .bind(input.instructor_id)
            .bind(input.lesson_type_id)
            .bind(input.start_at)
            .bind(input.end_at)
            .bind(&input.description)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(lesson))
    }

    /// Whether any blocked-slot occurrence for the instructor intersects
    /// `requested`. Runs inside the booking transaction.
    async fn blocked_slot_clash(
        tx: &mut Transaction<'_, Postgres>,
        instructor_id: DbId,
        requested: TimeRange,
    ) -> Result<bool, sqlx::Error> {
        let slots: Vec<(DbId, chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>, String)> =
            sqlx::query_as(
                "SELECT id, start_date, end_date, repeat FROM blocked_slots \
                 WHERE instructor_id = $1",
            )
            .bind(instructor_id)
            .fetch_all(&mut **tx)
            .await?;

        for (id, start_date, end_date, repeat) in slots {
            let Ok(span) = TimeRange::new(start_date, end_date) else {
                tracing::warn!(slot_id = id, "Skipping blocked slot with inverted span");
                continue;
            };
            let Ok(repeat) = Repeat::from_str(&repeat) else {
                tracing::warn!(slot_id = id, repeat, "Skipping blocked slot with unknown repeat");
                continue;
            };
            if expand_occurrences(span, repeat, requested).next().is_some() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    // -----------------------------------------------------------------------
    // Lifecycle transition
    // -----------------------------------------------------------------------

    /// Apply a status transition and append its audit entry atomically.
    ///
    /// The update is conditional on the lesson still being in `from`, so
    /// a concurrent transition loses cleanly. Returns `Ok(None)` when no
    /// row was in the expected state; in that case nothing is written.
    pub async fn transition(
        pool: &PgPool,
        lesson_id: DbId,
        from: LessonStatus,
        to: LessonStatus,
        acting_user_id: DbId,
        action: &str,
        description: Option<&str>,
    ) -> Result<Option<DrivingLesson>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE driving_lessons \
             SET status = $3, \
                 description = COALESCE($4, description), \
                 updated_at = now() \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        let lesson = sqlx::query_as::<_, DrivingLesson>(&query)
            .bind(lesson_id)
            .bind(from.as_str())
            .bind(to.as_str())
            .bind(description)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(lesson) = lesson else {
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO lesson_actions (lesson_id, user_id, action) VALUES ($1, $2, $3)",
        )
        .bind(lesson_id)
        .bind(acting_user_id)
        .bind(action)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(lesson))
    }

    // -----------------------------------------------------------------------
    // Bulk shift
    // -----------------------------------------------------------------------

    /// Move a batch of lessons to new spans in one transaction.
    ///
    /// Statuses are untouched and no audit entries are written. The
    /// exclusion constraint is deferred to commit so lessons within the
    /// batch may swap places. Returns `Ok(Some(id))` (and rolls back
    /// everything) when a lesson does not exist.
    pub async fn shift(
        pool: &PgPool,
        lessons: &[ShiftLesson],
    ) -> Result<Option<DbId>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SET CONSTRAINTS ex_driving_lessons_no_overlap DEFERRED")
            .execute(&mut *tx)
            .await?;

        for lesson in lessons {
            let updated = sqlx::query(
                "UPDATE driving_lessons \
                 SET start_at = $2, end_at = $3, updated_at = now() \
                 WHERE id = $1",
            )
            .bind(lesson.id)
            .bind(lesson.start_at)
            .bind(lesson.end_at)
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                return Ok(Some(lesson.id));
            }
        }

        tx.commit().await?;
        Ok(None)
    }
}

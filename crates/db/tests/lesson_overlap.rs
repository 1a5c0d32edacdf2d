//! Integration tests for the lesson overlap backstop at the storage layer.
//!
//! Exercises the `ex_driving_lessons_no_overlap` exclusion constraint
//! against a real database:
//! - Direct inserts of overlapping active lessons are rejected
//! - `LessonRepo::shift` onto an occupied span fails at commit and rolls back
//! - Lessons within a shift batch may swap spans (constraint is deferred)
//! - Declined lessons do not occupy their span

use chrono::{DateTime, TimeZone, Utc};
use sqlx::PgPool;

use fahrplan_db::models::lesson::{RequestLesson, ShiftLesson};
use fahrplan_db::repositories::LessonRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A time on Monday 2024-03-04 UTC.
fn ts(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, hour, minute, 0).unwrap()
}

async fn seed_user(pool: &PgPool, role: &str, email: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (role, first_name, last_name, email) \
         VALUES ($1, 'Greta', 'Weber', $2) RETURNING id",
    )
    .bind(role)
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn seed_lesson_type(pool: &PgPool) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO lesson_types (name, duration_minutes) \
         VALUES ('Standard', 60) RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn seed_lesson(
    pool: &PgPool,
    student_id: i64,
    instructor_id: i64,
    lesson_type_id: i64,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    status: &str,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO driving_lessons \
            (student_id, instructor_id, lesson_type_id, start_at, end_at, status) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
    )
    .bind(student_id)
    .bind(instructor_id)
    .bind(lesson_type_id)
    .bind(start_at)
    .bind(end_at)
    .bind(status)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn seed_base(pool: &PgPool) -> (i64, i64, i64) {
    let instructor_id = seed_user(pool, "INSTRUCTOR", "instructor@example.com").await;
    let student_id = seed_user(pool, "STUDENT", "student@example.com").await;
    let lesson_type_id = seed_lesson_type(pool).await;
    (instructor_id, student_id, lesson_type_id)
}

async fn lesson_span(pool: &PgPool, id: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    sqlx::query_as("SELECT start_at, end_at FROM driving_lessons WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Unwrap the Postgres error inside a failed query result.
fn database_error(result: Result<i64, sqlx::Error>) -> Box<dyn sqlx::error::DatabaseError> {
    match result.expect_err("Overlapping active lessons should be rejected") {
        sqlx::Error::Database(db_err) => db_err,
        other => panic!("Expected a database error, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Direct inserts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn overlapping_active_insert_rejected(pool: PgPool) {
    let (instructor_id, student_id, lesson_type_id) = seed_base(&pool).await;
    seed_lesson(
        &pool,
        student_id,
        instructor_id,
        lesson_type_id,
        ts(9, 0),
        ts(10, 0),
        "CONFIRMED",
    )
    .await;

    let result = sqlx::query_scalar(
        "INSERT INTO driving_lessons \
            (student_id, instructor_id, lesson_type_id, start_at, end_at, status) \
         VALUES ($1, $2, $3, $4, $5, 'REQUESTED') RETURNING id",
    )
    .bind(student_id)
    .bind(instructor_id)
    .bind(lesson_type_id)
    .bind(ts(9, 30))
    .bind(ts(10, 30))
    .fetch_one(&pool)
    .await;

    let db_err = database_error(result);
    assert_eq!(db_err.code().as_deref(), Some("23P01"), "Expected exclusion violation");
    assert_eq!(db_err.constraint(), Some("ex_driving_lessons_no_overlap"));
}

#[sqlx::test(migrations = "./migrations")]
async fn declined_lesson_does_not_occupy_span(pool: PgPool) {
    let (instructor_id, student_id, lesson_type_id) = seed_base(&pool).await;
    seed_lesson(
        &pool,
        student_id,
        instructor_id,
        lesson_type_id,
        ts(9, 0),
        ts(10, 0),
        "DECLINED",
    )
    .await;

    let booked = LessonRepo::request(
        &pool,
        &RequestLesson {
            student_id,
            instructor_id,
            lesson_type_id,
            start_at: ts(9, 0),
            end_at: ts(10, 0),
            description: None,
        },
    )
    .await
    .unwrap();

    assert!(booked.is_some(), "Declined lessons should not block the slot");
}

// ---------------------------------------------------------------------------
// Shift
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn shift_onto_occupied_span_fails_at_commit_and_rolls_back(pool: PgPool) {
    let (instructor_id, student_id, lesson_type_id) = seed_base(&pool).await;
    seed_lesson(
        &pool,
        student_id,
        instructor_id,
        lesson_type_id,
        ts(9, 0),
        ts(10, 0),
        "CONFIRMED",
    )
    .await;
    let moved_id = seed_lesson(
        &pool,
        student_id,
        instructor_id,
        lesson_type_id,
        ts(14, 0),
        ts(15, 0),
        "REQUESTED",
    )
    .await;

    let result = LessonRepo::shift(
        &pool,
        &[ShiftLesson {
            id: moved_id,
            start_at: ts(9, 30),
            end_at: ts(10, 30),
        }],
    )
    .await;

    // The constraint is deferred, so the violation surfaces at commit.
    let err = result.expect_err("Shift onto an occupied span should fail");
    let db_err = match err {
        sqlx::Error::Database(db_err) => db_err,
        other => panic!("Expected a database error, got: {other:?}"),
    };
    assert_eq!(db_err.code().as_deref(), Some("23P01"));
    assert_eq!(db_err.constraint(), Some("ex_driving_lessons_no_overlap"));

    let (start_at, end_at) = lesson_span(&pool, moved_id).await;
    assert_eq!(start_at, ts(14, 0), "Failed shift should leave the span unchanged");
    assert_eq!(end_at, ts(15, 0));
}

#[sqlx::test(migrations = "./migrations")]
async fn shift_batch_can_swap_two_lessons(pool: PgPool) {
    let (instructor_id, student_id, lesson_type_id) = seed_base(&pool).await;
    let first_id = seed_lesson(
        &pool,
        student_id,
        instructor_id,
        lesson_type_id,
        ts(9, 0),
        ts(10, 0),
        "CONFIRMED",
    )
    .await;
    let second_id = seed_lesson(
        &pool,
        student_id,
        instructor_id,
        lesson_type_id,
        ts(10, 0),
        ts(11, 0),
        "CONFIRMED",
    )
    .await;

    let missing = LessonRepo::shift(
        &pool,
        &[
            ShiftLesson {
                id: first_id,
                start_at: ts(10, 0),
                end_at: ts(11, 0),
            },
            ShiftLesson {
                id: second_id,
                start_at: ts(9, 0),
                end_at: ts(10, 0),
            },
        ],
    )
    .await
    .unwrap();

    assert!(missing.is_none(), "Swap within one batch should commit");
    let (first_start, _) = lesson_span(&pool, first_id).await;
    let (second_start, _) = lesson_span(&pool, second_id).await;
    assert_eq!(first_start, ts(10, 0));
    assert_eq!(second_start, ts(9, 0));
}

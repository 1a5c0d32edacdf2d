//! Integration tests for the instructor availability endpoint.
//!
//! Fixed dates use Monday 2024-03-04.

mod common;

use axum::http::StatusCode;
use common::{
    assert_status, get, seed_blocked_slot, seed_instructor, seed_lesson, seed_lesson_type,
    seed_student, seed_working_hours,
};
use sqlx::PgPool;

async fn seed_base(pool: &PgPool) -> (i64, i64, i64) {
    let instructor_id = seed_instructor(pool, "ingrid@fahrschule.test").await;
    let student_id = seed_student(pool, "sam@fahrschule.test", instructor_id).await;
    let lesson_type_id = seed_lesson_type(pool, "Standard", 60).await;
    (instructor_id, student_id, lesson_type_id)
}

fn availability_uri(instructor_id: i64, from: &str, to: &str, lesson_type_id: i64) -> String {
    format!(
        "/api/v1/instructors/{instructor_id}/availability\
         ?from={from}&to={to}&lesson_type_id={lesson_type_id}"
    )
}

// ---------------------------------------------------------------------------
// Test: free slots around lessons and blocked slots
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn free_slots_complement_lessons_and_blocks(pool: PgPool) {
    let (instructor_id, student_id, lesson_type_id) = seed_base(&pool).await;
    // Monday 08:00-18:00.
    seed_working_hours(&pool, instructor_id, 0, "08:00", "18:00").await;
    // Lunch block 12:00-13:00 and a confirmed lesson 09:00-10:00.
    seed_blocked_slot(
        &pool,
        instructor_id,
        "2024-03-04T12:00:00Z",
        "2024-03-04T13:00:00Z",
        "NEVER",
    )
    .await;
    seed_lesson(
        &pool,
        student_id,
        instructor_id,
        lesson_type_id,
        "2024-03-04T09:00:00Z",
        "2024-03-04T10:00:00Z",
        "CONFIRMED",
    )
    .await;
    let app = common::build_test_app(pool);

    let uri = availability_uri(
        instructor_id,
        "2024-03-04T00:00:00Z",
        "2024-03-05T00:00:00Z",
        lesson_type_id,
    );
    let response = get(app, &uri).await;
    let json = assert_status(response, StatusCode::OK).await;

    let slots = json["data"].as_array().unwrap();
    assert_eq!(slots.len(), 3, "expected three free slots, got: {slots:?}");
    assert_eq!(slots[0]["start"], "2024-03-04T08:00:00Z");
    assert_eq!(slots[0]["end"], "2024-03-04T09:00:00Z");
    assert_eq!(slots[1]["start"], "2024-03-04T10:00:00Z");
    assert_eq!(slots[1]["end"], "2024-03-04T12:00:00Z");
    assert_eq!(slots[2]["start"], "2024-03-04T13:00:00Z");
    assert_eq!(slots[2]["end"], "2024-03-04T18:00:00Z");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn gaps_shorter_than_the_lesson_are_dropped(pool: PgPool) {
    let (instructor_id, student_id, _) = seed_base(&pool).await;
    let long_type = seed_lesson_type(&pool, "Motorway", 120).await;
    seed_working_hours(&pool, instructor_id, 0, "08:00", "12:00").await;
    // 09:30-10:00 leaves a 90-minute gap before and a 120-minute gap after.
    seed_lesson(
        &pool,
        student_id,
        instructor_id,
        long_type,
        "2024-03-04T09:30:00Z",
        "2024-03-04T10:00:00Z",
        "CONFIRMED",
    )
    .await;
    let app = common::build_test_app(pool);

    let uri = availability_uri(
        instructor_id,
        "2024-03-04T00:00:00Z",
        "2024-03-05T00:00:00Z",
        long_type,
    );
    let response = get(app, &uri).await;
    let json = assert_status(response, StatusCode::OK).await;

    let slots = json["data"].as_array().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0]["start"], "2024-03-04T10:00:00Z");
    assert_eq!(slots[0]["end"], "2024-03-04T12:00:00Z");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn weekly_block_applies_in_later_weeks(pool: PgPool) {
    let (instructor_id, _, lesson_type_id) = seed_base(&pool).await;
    seed_working_hours(&pool, instructor_id, 0, "08:00", "12:00").await;
    // Defined four weeks before the queried Monday.
    seed_blocked_slot(
        &pool,
        instructor_id,
        "2024-02-05T08:00:00Z",
        "2024-02-05T10:00:00Z",
        "WEEKLY",
    )
    .await;
    let app = common::build_test_app(pool);

    let uri = availability_uri(
        instructor_id,
        "2024-03-04T00:00:00Z",
        "2024-03-05T00:00:00Z",
        lesson_type_id,
    );
    let response = get(app, &uri).await;
    let json = assert_status(response, StatusCode::OK).await;

    let slots = json["data"].as_array().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0]["start"], "2024-03-04T10:00:00Z");
    assert_eq!(slots[0]["end"], "2024-03-04T12:00:00Z");
}

// ---------------------------------------------------------------------------
// Test: error cases
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn no_working_hours_returns_404(pool: PgPool) {
    let (instructor_id, _, lesson_type_id) = seed_base(&pool).await;
    let app = common::build_test_app(pool);

    let uri = availability_uri(
        instructor_id,
        "2024-03-04T00:00:00Z",
        "2024-03-05T00:00:00Z",
        lesson_type_id,
    );
    let response = get(app, &uri).await;
    assert_status(response, StatusCode::NOT_FOUND).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn inverted_query_range_returns_400(pool: PgPool) {
    let (instructor_id, _, lesson_type_id) = seed_base(&pool).await;
    seed_working_hours(&pool, instructor_id, 0, "08:00", "18:00").await;
    let app = common::build_test_app(pool);

    let uri = availability_uri(
        instructor_id,
        "2024-03-05T00:00:00Z",
        "2024-03-04T00:00:00Z",
        lesson_type_id,
    );
    let response = get(app, &uri).await;
    assert_status(response, StatusCode::BAD_REQUEST).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_lesson_type_returns_404(pool: PgPool) {
    let (instructor_id, _, _) = seed_base(&pool).await;
    seed_working_hours(&pool, instructor_id, 0, "08:00", "18:00").await;
    let app = common::build_test_app(pool);

    let uri = availability_uri(
        instructor_id,
        "2024-03-04T00:00:00Z",
        "2024-03-05T00:00:00Z",
        999_999,
    );
    let response = get(app, &uri).await;
    assert_status(response, StatusCode::NOT_FOUND).await;
}

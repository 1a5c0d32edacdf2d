#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use fahrplan_api::config::ServerConfig;
use fahrplan_api::router::build_app_router;
use fahrplan_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This goes through the same [`build_app_router`] as `main.rs`, so
/// integration tests exercise the production middleware stack (CORS,
/// request ID, timeout, tracing, panic recovery).
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request and return the raw response.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a request with a JSON body and return the raw response.
pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: &serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: &serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: &serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: &serde_json::Value) -> Response<Body> {
    send_json(app, Method::PATCH, uri, body).await
}

/// Send a DELETE request and return the raw response.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the response status and return the parsed body.
pub async fn assert_status(response: Response<Body>, expected: StatusCode) -> serde_json::Value {
    let status = response.status();
    let body = body_json(response).await;
    assert_eq!(status, expected, "unexpected status, body: {body}");
    body
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Insert an instructor and return their id.
pub async fn seed_instructor(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (role, first_name, last_name, email, phone) \
         VALUES ('INSTRUCTOR', 'Ingrid', 'Instructor', $1, '+49 151 0000000') \
         RETURNING id",
    )
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert a student with pickup data and return their id.
pub async fn seed_student(pool: &PgPool, email: &str, instructor_id: i64) -> i64 {
    let student_id: i64 = sqlx::query_scalar(
        "INSERT INTO users (role, first_name, last_name, email, phone) \
         VALUES ('STUDENT', 'Sam', 'Student', $1, '+49 151 1111111') \
         RETURNING id",
    )
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO student_data (user_id, instructor_id, pickup_address, pickup_lat, pickup_lng) \
         VALUES ($1, $2, 'Hauptstrasse 1, Berlin', 52.52, 13.405)",
    )
    .bind(student_id)
    .bind(instructor_id)
    .execute(pool)
    .await
    .unwrap();

    student_id
}

/// Insert a lesson type and return its id.
pub async fn seed_lesson_type(pool: &PgPool, name: &str, duration_minutes: i32) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO lesson_types (name, duration_minutes) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(duration_minutes)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert a working-hours window for one weekday (0 = Monday).
pub async fn seed_working_hours(
    pool: &PgPool,
    instructor_id: i64,
    weekday: i16,
    start_time: &str,
    end_time: &str,
) {
    sqlx::query(
        "INSERT INTO working_hours (instructor_id, weekday, start_time, end_time) \
         VALUES ($1, $2, $3::time, $4::time)",
    )
    .bind(instructor_id)
    .bind(weekday)
    .bind(start_time)
    .bind(end_time)
    .execute(pool)
    .await
    .unwrap();
}

/// Insert a lesson directly with the given status and return its id.
pub async fn seed_lesson(
    pool: &PgPool,
    student_id: i64,
    instructor_id: i64,
    lesson_type_id: i64,
    start_at: &str,
    end_at: &str,
    status: &str,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO driving_lessons \
            (student_id, instructor_id, lesson_type_id, start_at, end_at, status) \
         VALUES ($1, $2, $3, $4::timestamptz, $5::timestamptz, $6) \
         RETURNING id",
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

/// Insert a blocked slot and return its id.
pub async fn seed_blocked_slot(
    pool: &PgPool,
    instructor_id: i64,
    start_date: &str,
    end_date: &str,
    repeat: &str,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO blocked_slots (instructor_id, name, start_date, end_date, repeat) \
         VALUES ($1, 'Lunch', $2::timestamptz, $3::timestamptz, $4) \
         RETURNING id",
    )
    .bind(instructor_id)
    .bind(start_date)
    .bind(end_date)
    .bind(repeat)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub mod blocked_slots;
pub mod health;
pub mod instructors;
pub mod lessons;
pub mod students;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /lessons                                   request a lesson (POST)
/// /lessons/shift                             bulk reschedule (POST)
/// /lessons/{id}                              lesson with student data (GET)
/// /lessons/{id}/confirm                      confirm (POST)
/// /lessons/{id}/cancel                       cancel (POST)
/// /lessons/{id}/actions                      audit log (GET)
///
/// /instructors/{id}/lessons                  day or week view (?date&scope&status)
/// /instructors/{id}/availability             free slots (?from&to&lesson_type_id)
/// /instructors/{id}/working-hours            get, replace (GET, PUT)
/// /instructors/{id}/blocked-slots            list (GET)
///
/// /students/{id}/lessons                     week view (?date)
///
/// /blocked-slots                             create (POST)
/// /blocked-slots/{id}                        delete (DELETE)
///
/// /users/{id}/profile                        get, update (GET, PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Lesson booking and lifecycle.
        .nest("/lessons", lessons::router())
        // Instructor calendar views and configuration.
        .nest("/instructors", instructors::router())
        // Student week view.
        .nest("/students", students::router())
        // Blocked-slot management.
        .nest("/blocked-slots", blocked_slots::router())
        // User profiles.
        .nest("/users", users::router())
}

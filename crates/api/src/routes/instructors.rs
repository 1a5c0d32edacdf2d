//! Route definitions for instructor-scoped resources.

use axum::routing::get;
use axum::Router;

use crate::handlers::{availability, blocked_slots, lessons, working_hours};
use crate::state::AppState;

/// Routes mounted at `/instructors`.
///
/// ```text
/// GET    /{id}/lessons         -> list_instructor_lessons
/// GET    /{id}/availability    -> get_availability
/// GET    /{id}/working-hours   -> get_working_hours
/// PUT    /{id}/working-hours   -> replace_working_hours
/// GET    /{id}/blocked-slots   -> list_blocked_slots
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/lessons", get(lessons::list_instructor_lessons))
        .route("/{id}/availability", get(availability::get_availability))
        .route(
            "/{id}/working-hours",
            get(working_hours::get_working_hours).put(working_hours::replace_working_hours),
        )
        .route("/{id}/blocked-slots", get(blocked_slots::list_blocked_slots))
}

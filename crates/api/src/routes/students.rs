//! Route definitions for student-scoped resources.

use axum::routing::get;
use axum::Router;

use crate::handlers::lessons;
use crate::state::AppState;

/// Routes mounted at `/students`.
///
/// ```text
/// GET    /{id}/lessons   -> list_student_lessons
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/lessons", get(lessons::list_student_lessons))
}

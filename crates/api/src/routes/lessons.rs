//! Route definitions for the `/lessons` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::lessons;
use crate::state::AppState;

/// Routes mounted at `/lessons`.
///
/// ```text
/// POST   /                 -> request_lesson
/// POST   /shift            -> shift_lessons
/// GET    /{id}             -> get_lesson
/// POST   /{id}/confirm     -> confirm_lesson
/// POST   /{id}/cancel      -> cancel_lesson
/// GET    /{id}/actions     -> list_lesson_actions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(lessons::request_lesson))
        .route("/shift", post(lessons::shift_lessons))
        .route("/{id}", get(lessons::get_lesson))
        .route("/{id}/confirm", post(lessons::confirm_lesson))
        .route("/{id}/cancel", post(lessons::cancel_lesson))
        .route("/{id}/actions", get(lessons::list_lesson_actions))
}

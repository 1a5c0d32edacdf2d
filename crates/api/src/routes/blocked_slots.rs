//! Route definitions for the `/blocked-slots` resource.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::blocked_slots;
use crate::state::AppState;

/// Routes mounted at `/blocked-slots`.
///
/// ```text
/// POST    /        -> create_blocked_slot
/// DELETE  /{id}    -> delete_blocked_slot
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(blocked_slots::create_blocked_slot))
        .route("/{id}", delete(blocked_slots::delete_blocked_slot))
}

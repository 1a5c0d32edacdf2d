//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /{id}/profile   -> get_profile
/// PATCH  /{id}/profile   -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}/profile",
        get(profile::get_profile).patch(profile::update_profile),
    )
}

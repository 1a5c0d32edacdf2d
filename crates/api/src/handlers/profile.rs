//! Handlers for user profiles.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use fahrplan_core::error::CoreError;
use fahrplan_core::types::DbId;
use fahrplan_db::models::user::{StudentData, UpdateProfile, User, ROLE_STUDENT};
use fahrplan_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// A user profile with the student's pickup data when applicable.
#[derive(Debug, Serialize)]
pub struct Profile {
    #[serde(flatten)]
    pub user: User,
    pub student_data: Option<StudentData>,
}

async fn load_student_data(
    state: &AppState,
    user: &User,
) -> Result<Option<StudentData>, sqlx::Error> {
    if user.role == ROLE_STUDENT {
        UserRepo::find_student_data(&state.pool, user.id).await
    } else {
        Ok(None)
    }
}

/// GET /api/v1/users/{id}/profile
///
/// Get a user's profile. Students additionally carry their pickup data.
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    let student_data = load_student_data(&state, &user).await?;

    Ok(Json(DataResponse {
        data: Profile { user, student_data },
    }))
}

/// PATCH /api/v1/users/{id}/profile
///
/// Update a user's profile. Omitted fields keep their current value.
pub async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::update_profile(&state.pool, user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    let student_data = load_student_data(&state, &user).await?;

    tracing::info!(user_id, "Profile updated");

    Ok(Json(DataResponse {
        data: Profile { user, student_data },
    }))
}

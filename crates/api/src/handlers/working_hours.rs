//! Handlers for instructor working-hours configuration.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use fahrplan_core::error::CoreError;
use fahrplan_core::types::DbId;
use fahrplan_db::models::working_hours::UpsertWorkingHours;
use fahrplan_db::repositories::WorkingHoursRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/instructors/{id}/working-hours
///
/// List an instructor's weekly working-hours windows.
pub async fn get_working_hours(
    State(state): State<AppState>,
    Path(instructor_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let hours = WorkingHoursRepo::list_by_instructor(&state.pool, instructor_id).await?;

    Ok(Json(DataResponse { data: hours }))
}

/// PUT /api/v1/instructors/{id}/working-hours
///
/// Replace the instructor's whole weekly configuration. Windows must
/// have a weekday in 0..=6 (Monday = 0) and a start before their end;
/// one window per weekday is enforced by the database.
pub async fn replace_working_hours(
    State(state): State<AppState>,
    Path(instructor_id): Path<DbId>,
    Json(input): Json<Vec<UpsertWorkingHours>>,
) -> AppResult<impl IntoResponse> {
    for window in &input {
        if !(0..=6).contains(&window.weekday) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Weekday must be between 0 and 6, got {}",
                window.weekday
            ))));
        }
        if window.start_time >= window.end_time {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Working hours must start before they end ({} >= {})",
                window.start_time, window.end_time
            ))));
        }
    }

    let hours = WorkingHoursRepo::replace_for_instructor(&state.pool, instructor_id, &input).await?;

    tracing::info!(
        instructor_id,
        windows = hours.len(),
        "Working hours replaced",
    );

    Ok(Json(DataResponse { data: hours }))
}

//! Handlers for instructor blocked slots.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use fahrplan_core::error::CoreError;
use fahrplan_core::recurrence::Repeat;
use fahrplan_core::time_range::TimeRange;
use fahrplan_core::types::DbId;
use fahrplan_db::models::blocked_slot::CreateBlockedSlot;
use fahrplan_db::models::user::ROLE_INSTRUCTOR;
use fahrplan_db::repositories::{BlockedSlotRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/blocked-slots
///
/// Create a blocked slot. The base span must be a valid range and the
/// repeat rule must be one of the known values. Returns 201.
pub async fn create_blocked_slot(
    State(state): State<AppState>,
    Json(input): Json<CreateBlockedSlot>,
) -> AppResult<impl IntoResponse> {
    TimeRange::new(input.start_date, input.end_date)?;
    Repeat::from_str(&input.repeat)?;

    let instructor = UserRepo::find_by_id(&state.pool, input.instructor_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Instructor",
            id: input.instructor_id,
        }))?;
    if instructor.role != ROLE_INSTRUCTOR {
        return Err(AppError::BadRequest(format!(
            "User {} is not an instructor",
            input.instructor_id
        )));
    }

    let slot = BlockedSlotRepo::create(&state.pool, &input).await?;

    tracing::info!(
        slot_id = slot.id,
        instructor_id = slot.instructor_id,
        repeat = %slot.repeat,
        "Blocked slot created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: slot })))
}

/// GET /api/v1/instructors/{id}/blocked-slots
///
/// List an instructor's blocked slots (base definitions, not expanded
/// occurrences).
pub async fn list_blocked_slots(
    State(state): State<AppState>,
    Path(instructor_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let slots = BlockedSlotRepo::list_by_instructor(&state.pool, instructor_id).await?;

    Ok(Json(DataResponse { data: slots }))
}

/// DELETE /api/v1/blocked-slots/{id}
///
/// Delete a blocked slot. Removing the definition removes all its
/// future occurrences. Returns 204.
pub async fn delete_blocked_slot(
    State(state): State<AppState>,
    Path(slot_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = BlockedSlotRepo::delete(&state.pool, slot_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "BlockedSlot",
            id: slot_id,
        }));
    }

    tracing::info!(slot_id, "Blocked slot deleted");

    Ok(StatusCode::NO_CONTENT)
}

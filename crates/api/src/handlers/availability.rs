//! Handler for the instructor availability view.
//!
//! Combines working hours, active lessons, and expanded blocked-slot
//! occurrences into a list of bookable free slots.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use fahrplan_core::availability::compute_free_slots;
use fahrplan_core::error::CoreError;
use fahrplan_core::recurrence::expand_occurrences;
use fahrplan_core::time_range::TimeRange;
use fahrplan_core::types::{DbId, Timestamp};
use fahrplan_db::repositories::{BlockedSlotRepo, LessonRepo, LessonTypeRepo, WorkingHoursRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /instructors/{id}/availability`.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Start of the queried window (inclusive).
    pub from: Timestamp,
    /// End of the queried window (exclusive).
    pub to: Timestamp,
    /// Lesson type whose duration sets the minimum useful gap.
    pub lesson_type_id: DbId,
}

/// GET /api/v1/instructors/{id}/availability
///
/// Compute the instructor's free slots within `[from, to)` that can fit
/// a lesson of the given type. Returns 404 when the instructor has no
/// working hours configured at all.
pub async fn get_availability(
    State(state): State<AppState>,
    Path(instructor_id): Path<DbId>,
    Query(params): Query<AvailabilityQuery>,
) -> AppResult<impl IntoResponse> {
    let range = TimeRange::new(params.from, params.to)?;

    let lesson_type = LessonTypeRepo::find_by_id(&state.pool, params.lesson_type_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LessonType",
            id: params.lesson_type_id,
        }))?;

    let hours = WorkingHoursRepo::list_by_instructor(&state.pool, instructor_id).await?;
    if hours.is_empty() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Working hours for instructor",
            id: instructor_id,
        }));
    }
    let config = hours
        .iter()
        .map(|h| h.day_window())
        .collect::<Result<Vec<_>, _>>()?;

    // Occupancy is the union of active lesson spans and blocked-slot
    // occurrences that fall inside the queried window.
    let mut occupied = Vec::new();
    for lesson in LessonRepo::list_active_in_range(&state.pool, instructor_id, range).await? {
        occupied.push(lesson.time_range()?);
    }
    for slot in BlockedSlotRepo::list_by_instructor(&state.pool, instructor_id).await? {
        occupied.extend(expand_occurrences(slot.span()?, slot.repeat()?, range));
    }

    let free = compute_free_slots(&config, range, occupied, lesson_type.duration())?;

    Ok(Json(DataResponse { data: free }))
}

//! Handlers for lesson booking, lifecycle, and calendar views.
//!
//! The acting user is passed explicitly in request bodies; authentication
//! is handled by the gateway in front of this service.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use fahrplan_core::calendar::{day_range, week_range};
use fahrplan_core::error::CoreError;
use fahrplan_core::lesson::{state_machine, LessonStatus, ACTION_CANCEL, ACTION_CONFIRM};
use fahrplan_core::time_range::TimeRange;
use fahrplan_core::types::DbId;
use fahrplan_db::models::lesson::{
    InstructorLessonsQuery, RequestLesson, ShiftLesson, StudentLessonsQuery,
};
use fahrplan_db::models::user::ROLE_INSTRUCTOR;
use fahrplan_db::repositories::{LessonActionRepo, LessonRepo, LessonTypeRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `POST /lessons/{id}/confirm`.
#[derive(Debug, Deserialize)]
pub struct ConfirmLesson {
    /// The instructor performing the confirmation.
    pub user_id: DbId,
}

/// Body for `POST /lessons/{id}/cancel`.
#[derive(Debug, Deserialize)]
pub struct CancelLesson {
    /// The user performing the cancellation.
    pub user_id: DbId,
    /// Optional cancellation reason, stored on the lesson.
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// POST /api/v1/lessons
///
/// Request a lesson. Validates the time range, checks that its length
/// matches the lesson type, and books atomically against the instructor's
/// existing lessons and blocked slots. Returns 201 with the created
/// lesson, or 409 when the slot is taken.
pub async fn request_lesson(
    State(state): State<AppState>,
    Json(input): Json<RequestLesson>,
) -> AppResult<impl IntoResponse> {
    let range = TimeRange::new(input.start_at, input.end_at)?;

    let lesson_type = LessonTypeRepo::find_by_id(&state.pool, input.lesson_type_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LessonType",
            id: input.lesson_type_id,
        }))?;

    if range.duration() != lesson_type.duration() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Lesson '{}' must be exactly {} minutes long",
            lesson_type.name, lesson_type.duration_minutes
        ))));
    }

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

    UserRepo::find_by_id(&state.pool, input.student_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id: input.student_id,
        }))?;

    let lesson = LessonRepo::request(&state.pool, &input)
        .await?
        .ok_or(AppError::Core(CoreError::Overlap(
            "Requested time overlaps an existing lesson or blocked slot".to_string(),
        )))?;

    tracing::info!(
        lesson_id = lesson.id,
        instructor_id = lesson.instructor_id,
        student_id = lesson.student_id,
        "Lesson requested",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: lesson })))
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

/// GET /api/v1/lessons/{id}
///
/// Get a lesson with its student and pickup data.
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let lesson = LessonRepo::find_by_id_with_student(&state.pool, lesson_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lesson",
            id: lesson_id,
        }))?;

    Ok(Json(DataResponse { data: lesson }))
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Apply a lifecycle transition to a lesson and append its audit entry.
///
/// Validates the transition against the lesson's current status first;
/// the conditional update in the repository then guards against a
/// concurrent transition winning in between.
async fn transition_lesson(
    state: &AppState,
    lesson_id: DbId,
    to: LessonStatus,
    acting_user_id: DbId,
    action: &str,
    description: Option<&str>,
) -> AppResult<impl IntoResponse> {
    let lesson = LessonRepo::find_by_id(&state.pool, lesson_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lesson",
            id: lesson_id,
        }))?;

    let current = lesson.status()?;
    state_machine::validate_transition(current, to)?;

    let updated = LessonRepo::transition(
        &state.pool,
        lesson_id,
        current,
        to,
        acting_user_id,
        action,
        description,
    )
    .await?
    .ok_or(AppError::Core(CoreError::InvalidTransition {
        from: current.as_str(),
        to: to.as_str(),
    }))?;

    tracing::info!(
        lesson_id,
        user_id = acting_user_id,
        action,
        status = %updated.status,
        "Lesson transitioned",
    );

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/lessons/{id}/confirm
///
/// Confirm a requested lesson. Returns 409 if the lesson is not in a
/// confirmable state.
pub async fn confirm_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<DbId>,
    Json(input): Json<ConfirmLesson>,
) -> AppResult<impl IntoResponse> {
    transition_lesson(
        &state,
        lesson_id,
        LessonStatus::Confirmed,
        input.user_id,
        ACTION_CONFIRM,
        None,
    )
    .await
}

/// POST /api/v1/lessons/{id}/cancel
///
/// Cancel a requested or confirmed lesson. Declining a request and
/// cancelling a confirmed lesson both end in `DECLINED`. Returns 409 if
/// the lesson is already declined.
pub async fn cancel_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<DbId>,
    Json(input): Json<CancelLesson>,
) -> AppResult<impl IntoResponse> {
    transition_lesson(
        &state,
        lesson_id,
        LessonStatus::Declined,
        input.user_id,
        ACTION_CANCEL,
        input.reason.as_deref(),
    )
    .await
}

// ---------------------------------------------------------------------------
// Bulk shift
// ---------------------------------------------------------------------------

/// POST /api/v1/lessons/shift
///
/// Move a batch of lessons to new spans. The whole batch is applied in
/// one transaction; if any lesson is missing, nothing moves and the 404
/// names the missing lesson. Returns 204 on success.
pub async fn shift_lessons(
    State(state): State<AppState>,
    Json(input): Json<Vec<ShiftLesson>>,
) -> AppResult<impl IntoResponse> {
    for lesson in &input {
        TimeRange::new(lesson.start_at, lesson.end_at)?;
    }

    if let Some(missing) = LessonRepo::shift(&state.pool, &input).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Lesson",
            id: missing,
        }));
    }

    tracing::info!(count = input.len(), "Lessons shifted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Audit log
// ---------------------------------------------------------------------------

/// GET /api/v1/lessons/{id}/actions
///
/// List a lesson's audit log in chronological order.
pub async fn list_lesson_actions(
    State(state): State<AppState>,
    Path(lesson_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    LessonRepo::find_by_id(&state.pool, lesson_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lesson",
            id: lesson_id,
        }))?;

    let actions = LessonActionRepo::list_by_lesson(&state.pool, lesson_id).await?;

    Ok(Json(DataResponse { data: actions }))
}

// ---------------------------------------------------------------------------
// Calendar views
// ---------------------------------------------------------------------------

/// GET /api/v1/instructors/{id}/lessons
///
/// Instructor calendar view with student data. `scope` selects a day
/// (default) or ISO week around `date`; `status` narrows the listing to
/// a single status instead of the active set.
pub async fn list_instructor_lessons(
    State(state): State<AppState>,
    Path(instructor_id): Path<DbId>,
    Query(params): Query<InstructorLessonsQuery>,
) -> AppResult<impl IntoResponse> {
    let date = params.date.unwrap_or_else(Utc::now);
    let range = match params.scope.as_deref() {
        None | Some("day") => day_range(date),
        Some("week") => week_range(date),
        Some(other) => {
            return Err(AppError::BadRequest(format!(
                "Unknown scope '{other}', expected 'day' or 'week'"
            )));
        }
    };

    let status = params
        .status
        .as_deref()
        .map(LessonStatus::from_str)
        .transpose()?;

    let lessons =
        LessonRepo::list_for_instructor(&state.pool, instructor_id, range, status).await?;

    Ok(Json(DataResponse { data: lessons }))
}

/// GET /api/v1/students/{id}/lessons
///
/// Student week view. Only active (requested or confirmed) lessons are
/// returned.
pub async fn list_student_lessons(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
    Query(params): Query<StudentLessonsQuery>,
) -> AppResult<impl IntoResponse> {
    let date = params.date.unwrap_or_else(Utc::now);
    let range = week_range(date);

    let lessons = LessonRepo::list_for_student(&state.pool, student_id, range).await?;

    Ok(Json(DataResponse { data: lessons }))
}

//! Lesson status constants and lifecycle state machine.
//!
//! A lesson is created in `REQUESTED` and only ever moves through the
//! transitions validated here. Cancelling and declining share the
//! terminal `DECLINED` status (the audit action tag tells them apart);
//! time shifts mutate start/end without touching status and are not
//! transitions.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Awaiting instructor confirmation.
pub const STATUS_REQUESTED: &str = "REQUESTED";
/// Accepted by the instructor.
pub const STATUS_CONFIRMED: &str = "CONFIRMED";
/// Declined or cancelled. Terminal.
pub const STATUS_DECLINED: &str = "DECLINED";

/// All valid lesson statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_REQUESTED, STATUS_CONFIRMED, STATUS_DECLINED];

// ---------------------------------------------------------------------------
// Audit action tags
// ---------------------------------------------------------------------------

/// Action tag written when a lesson is confirmed.
pub const ACTION_CONFIRM: &str = "confirm";
/// Action tag written when a lesson is cancelled or declined.
pub const ACTION_CANCEL: &str = "cancel";

// ---------------------------------------------------------------------------
// Status enum
// ---------------------------------------------------------------------------

/// Lesson status enum with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonStatus {
    Requested,
    Confirmed,
    Declined,
}

impl LessonStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => STATUS_REQUESTED,
            Self::Confirmed => STATUS_CONFIRMED,
            Self::Declined => STATUS_DECLINED,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_REQUESTED => Ok(Self::Requested),
            STATUS_CONFIRMED => Ok(Self::Confirmed),
            STATUS_DECLINED => Ok(Self::Declined),
            other => Err(CoreError::Validation(format!(
                "Unknown lesson status: '{other}'. Valid statuses: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }
}

/// Statuses that occupy an instructor's time. Availability queries and
/// overlap checks filter with set membership over this slice, never with
/// a single-status shortcut.
pub const ACTIVE_STATUSES: &[LessonStatus] = &[LessonStatus::Requested, LessonStatus::Confirmed];

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

pub mod state_machine {
    use super::LessonStatus;
    use crate::error::CoreError;

    /// Returns the set of valid target statuses reachable from `from`.
    ///
    /// `Declined` is terminal and returns an empty slice.
    pub fn valid_transitions(from: LessonStatus) -> &'static [LessonStatus] {
        match from {
            LessonStatus::Requested => &[LessonStatus::Confirmed, LessonStatus::Declined],
            LessonStatus::Confirmed => &[LessonStatus::Declined],
            LessonStatus::Declined => &[],
        }
    }

    /// Check whether a transition from `from` to `to` is valid.
    pub fn can_transition(from: LessonStatus, to: LessonStatus) -> bool {
        valid_transitions(from).contains(&to)
    }

    /// Validate a transition, returning `InvalidTransition` for bad ones.
    pub fn validate_transition(from: LessonStatus, to: LessonStatus) -> Result<(), CoreError> {
        if can_transition(from, to) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                from: from.as_str(),
                to: to.as_str(),
            })
        }
    }
}

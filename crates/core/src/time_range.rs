//! Half-open time intervals and overlap tests.
//!
//! Every interval in the scheduler is `[start, end)`: a lesson ending at
//! 10:00 and one starting at 10:00 do not collide. All interval math in
//! the availability and recurrence modules goes through this module.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// A half-open UTC interval `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeRange {
    /// Construct a range, rejecting empty and inverted spans.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, CoreError> {
        if start >= end {
            return Err(CoreError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Half-open overlap test. Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Length of the interval.
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Intersection with another range, if non-empty.
    pub fn intersection(&self, other: &TimeRange) -> Option<TimeRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            Some(TimeRange { start, end })
        } else {
            None
        }
    }
}

/// Free-function form of the overlap test for callers holding raw bounds.
pub fn intervals_overlap(
    a_start: Timestamp,
    a_end: Timestamp,
    b_start: Timestamp,
    b_end: Timestamp,
) -> bool {
    a_start < b_end && b_start < a_end
}

//! Free-slot computation for an instructor's calendar.
//!
//! The calculator subtracts occupied intervals (active lessons plus
//! expanded blocked-slot occurrences) from the instructor's working-hours
//! windows and keeps every remaining gap long enough for the requested
//! lesson duration. Inputs arrive pre-fetched: this module never touches
//! the database.

use chrono::{Datelike, Days, Duration, NaiveTime, TimeZone, Utc, Weekday};

use crate::error::CoreError;
use crate::time_range::TimeRange;

// ---------------------------------------------------------------------------
// Working-hours configuration
// ---------------------------------------------------------------------------

/// One weekday's working window for an instructor.
///
/// `start < end` is enforced by the storage layer; rows violating it
/// are skipped during expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Expand a per-weekday working-hours config into concrete windows for
/// every day intersecting `range`, clipped to the range and ordered by
/// start.
pub fn working_windows(config: &[DayWindow], range: TimeRange) -> Vec<TimeRange> {
    let mut windows = Vec::new();
    let mut day = range.start.date_naive();
    let last = range.end.date_naive();

    while day <= last {
        for window in config.iter().filter(|w| w.weekday == day.weekday()) {
            if window.start >= window.end {
                continue;
            }
            let candidate = TimeRange {
                start: Utc.from_utc_datetime(&day.and_time(window.start)),
                end: Utc.from_utc_datetime(&day.and_time(window.end)),
            };
            if let Some(clipped) = candidate.intersection(&range) {
                windows.push(clipped);
            }
        }
        day = day + Days::new(1);
    }

    windows.sort_by_key(|w| (w.start, w.end));
    windows
}

// ---------------------------------------------------------------------------
// Interval merging
// ---------------------------------------------------------------------------

/// Coalesce intervals into maximal occupied runs.
///
/// Sorts by start (ties broken by end), then merges overlapping and
/// adjacent intervals. Merging adjacent intervals is safe for complement
/// computation: a touching boundary leaves a zero-length gap, which no
/// positive lesson duration can use.
pub fn merge_intervals(mut intervals: Vec<TimeRange>) -> Vec<TimeRange> {
    intervals.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<TimeRange> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => {
                last.end = last.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}

// ---------------------------------------------------------------------------
// Free-slot computation
// ---------------------------------------------------------------------------

/// Complement of `occupied` within each window, keeping gaps >= `min_len`.
///
/// `occupied` may contain overlapping intervals in any order; they are
/// merged first so nothing is double-subtracted.
pub fn free_slots(
    windows: &[TimeRange],
    occupied: Vec<TimeRange>,
    min_len: Duration,
) -> Vec<TimeRange> {
    let occupied = merge_intervals(occupied);
    let mut free = Vec::new();

    for window in windows {
        let mut cursor = window.start;
        for busy in occupied.iter().filter(|b| b.overlaps(window)) {
            if busy.start > cursor {
                let gap = TimeRange {
                    start: cursor,
                    end: busy.start.min(window.end),
                };
                if gap.duration() >= min_len {
                    free.push(gap);
                }
            }
            cursor = cursor.max(busy.end);
            if cursor >= window.end {
                break;
            }
        }
        if cursor < window.end {
            let gap = TimeRange {
                start: cursor,
                end: window.end,
            };
            if gap.duration() >= min_len {
                free.push(gap);
            }
        }
    }

    free
}

/// Compute the free slots for one instructor over `range`.
///
/// `occupied` is the union of active-lesson spans and expanded
/// blocked-slot occurrences; `lesson_duration` is the minimum gap length
/// worth emitting. The caller is responsible for raising `NotFound` when
/// the instructor has no working-hours configuration at all.
pub fn compute_free_slots(
    config: &[DayWindow],
    range: TimeRange,
    occupied: Vec<TimeRange>,
    lesson_duration: Duration,
) -> Result<Vec<TimeRange>, CoreError> {
    if lesson_duration <= Duration::zero() {
        return Err(CoreError::Validation(
            "Lesson duration must be positive".to_string(),
        ));
    }
    let windows = working_windows(config, range);
    Ok(free_slots(&windows, occupied, lesson_duration))
}

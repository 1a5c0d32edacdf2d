//! Recurrence expansion for blocked slots.
//!
//! A blocked slot is one concrete span plus a repeat rule. Expanding it
//! against a query range yields every occurrence that intersects the
//! range, in start order. Daily/weekly rules advance by a fixed number of
//! days; monthly/yearly rules advance by calendar months, which clamps
//! the day-of-month to the end of shorter months (Jan 31 + 1 month is
//! Feb 28 or 29).
//!
//! Occurrence `n` is always computed from the *original* span by `n`
//! whole periods, so clamping never accumulates across months.

use chrono::{Days, Months};

use crate::error::CoreError;
use crate::time_range::TimeRange;

// ---------------------------------------------------------------------------
// Repeat rule
// ---------------------------------------------------------------------------

pub const REPEAT_NEVER: &str = "NEVER";
pub const REPEAT_DAILY: &str = "DAILY";
pub const REPEAT_WEEKLY: &str = "WEEKLY";
pub const REPEAT_MONTHLY: &str = "MONTHLY";
pub const REPEAT_YEARLY: &str = "YEARLY";

/// All valid repeat rules, in DB string form.
pub const VALID_REPEATS: &[&str] = &[
    REPEAT_NEVER,
    REPEAT_DAILY,
    REPEAT_WEEKLY,
    REPEAT_MONTHLY,
    REPEAT_YEARLY,
];

/// Repeat rule for a blocked slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Never,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Repeat {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Never => REPEAT_NEVER,
            Self::Daily => REPEAT_DAILY,
            Self::Weekly => REPEAT_WEEKLY,
            Self::Monthly => REPEAT_MONTHLY,
            Self::Yearly => REPEAT_YEARLY,
        }
    }

    /// Parse from a string, returning an error for unknown rules.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            REPEAT_NEVER => Ok(Self::Never),
            REPEAT_DAILY => Ok(Self::Daily),
            REPEAT_WEEKLY => Ok(Self::Weekly),
            REPEAT_MONTHLY => Ok(Self::Monthly),
            REPEAT_YEARLY => Ok(Self::Yearly),
            other => Err(CoreError::Validation(format!(
                "Unknown repeat rule: '{other}'. Valid rules: {}",
                VALID_REPEATS.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Calendar-aware span advancement
// ---------------------------------------------------------------------------

/// Advance `span` by `n` whole periods of `repeat`.
///
/// The start is advanced by the calendar unit (months clamp the
/// day-of-month); the end preserves the original span duration. Returns
/// `None` for `Repeat::Never` with `n > 0` or on timestamp overflow.
pub fn advance_span(span: TimeRange, repeat: Repeat, n: u32) -> Option<TimeRange> {
    if n == 0 {
        return Some(span);
    }
    let start = match repeat {
        Repeat::Never => return None,
        Repeat::Daily => span.start.checked_add_days(Days::new(u64::from(n)))?,
        Repeat::Weekly => span.start.checked_add_days(Days::new(7 * u64::from(n)))?,
        Repeat::Monthly => span.start.checked_add_months(Months::new(n))?,
        Repeat::Yearly => span.start.checked_add_months(Months::new(12 * n))?,
    };
    let end = start + span.duration();
    Some(TimeRange { start, end })
}

// ---------------------------------------------------------------------------
// Lazy occurrence expansion
// ---------------------------------------------------------------------------

/// Lazy iterator over occurrences of a recurring span that intersect a
/// query range. Finite: iteration stops at the first occurrence starting
/// at or after the end of the query range.
#[derive(Debug, Clone)]
pub struct Occurrences {
    span: TimeRange,
    repeat: Repeat,
    query: TimeRange,
    n: u32,
    done: bool,
}

impl Iterator for Occurrences {
    type Item = TimeRange;

    fn next(&mut self) -> Option<TimeRange> {
        if self.done {
            return None;
        }
        loop {
            let Some(occurrence) = advance_span(self.span, self.repeat, self.n) else {
                self.done = true;
                return None;
            };
            if occurrence.start >= self.query.end {
                self.done = true;
                return None;
            }
            if self.repeat == Repeat::Never {
                self.done = true;
            } else {
                self.n += 1;
            }
            if occurrence.overlaps(&self.query) {
                return Some(occurrence);
            }
            if self.done {
                return None;
            }
        }
    }
}

/// Expand a (possibly recurring) span into the occurrences intersecting
/// `query`, ordered by start ascending.
pub fn expand_occurrences(span: TimeRange, repeat: Repeat, query: TimeRange) -> Occurrences {
    Occurrences {
        span,
        repeat,
        query,
        n: 0,
        done: false,
    }
}

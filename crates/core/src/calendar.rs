//! Calendar boundary helpers shared by the query layer and tests.
//!
//! Weeks are ISO weeks: Monday 00:00 UTC through the following Monday,
//! half-open. Day and week ranges always have `start < end`, so the
//! `TimeRange` constructor cannot fail here.

use chrono::{Datelike, Days, NaiveDate, TimeZone, Utc};

use crate::time_range::TimeRange;
use crate::types::Timestamp;

/// Midnight UTC at the start of the day containing `instant`.
pub fn start_of_day(instant: Timestamp) -> Timestamp {
    day_start(instant.date_naive())
}

/// The half-open 24-hour range `[00:00, next 00:00)` containing `instant`.
pub fn day_range(instant: Timestamp) -> TimeRange {
    TimeRange {
        start: start_of_day(instant),
        end: day_start(instant.date_naive() + Days::new(1)),
    }
}

/// The half-open ISO week (Monday through Monday) containing `instant`.
pub fn week_range(instant: Timestamp) -> TimeRange {
    let date = instant.date_naive();
    let monday = date - Days::new(u64::from(date.weekday().num_days_from_monday()));
    TimeRange {
        start: day_start(monday),
        end: day_start(monday + Days::new(7)),
    }
}

fn day_start(date: NaiveDate) -> Timestamp {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight is valid"))
}

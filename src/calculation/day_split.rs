//! Midnight splitting.
//!
//! Turns a `[start, end)` interval into single-day [`Shift`]s. Calendar
//! duty and manual entries both produce intervals that may run past
//! midnight; this is the one place that decides how they are cut.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::{ClockTime, Shift, ShiftOrigin};

/// The result of splitting an interval at midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySplit {
    /// One or two single-day shifts, in chronological order. Empty when the
    /// interval is empty.
    pub shifts: Vec<Shift>,
    /// Whole days skipped between the first and last shift. Non-zero only
    /// when the interval ends two or more days after it starts.
    pub overflow_days: i64,
}

impl DaySplit {
    fn empty() -> Self {
        Self {
            shifts: Vec::new(),
            overflow_days: 0,
        }
    }
}

/// Places a clock time on a date. `2400` lands on the following midnight.
pub fn at_clock(date: NaiveDate, time: ClockTime) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(time.minutes()))
}

/// Splits `[start, end)` into per-day shifts.
///
/// - An interval within one day yields one shift.
/// - An interval ending exactly at the next midnight yields one shift ending
///   at `2400`.
/// - Otherwise the interval is cut once: `(start day, start, 2400)` and
///   `(end day, 0000, end)`. Days strictly between the two are not emitted;
///   their count is returned as `overflow_days`.
///
/// End times are truncated to the minute. Empty or inverted intervals, and
/// intervals that vanish after truncation, yield no shifts.
///
/// # Example
///
/// ```
/// use duty_hours_engine::calculation::split_at_midnight;
/// use duty_hours_engine::models::ShiftOrigin;
/// use chrono::NaiveDateTime;
///
/// let start = NaiveDateTime::parse_from_str("2025-06-03 23:00", "%Y-%m-%d %H:%M").unwrap();
/// let end = NaiveDateTime::parse_from_str("2025-06-04 02:00", "%Y-%m-%d %H:%M").unwrap();
///
/// let split = split_at_midnight(start, end, ShiftOrigin::Manual, "night call");
/// assert_eq!(split.shifts.len(), 2);
/// assert_eq!(split.shifts[0].end.to_string(), "2400");
/// assert_eq!(split.shifts[1].start.to_string(), "0000");
/// assert_eq!(split.shifts[1].end.to_string(), "0200");
/// assert_eq!(split.overflow_days, 0);
/// ```
pub fn split_at_midnight(
    start: NaiveDateTime,
    end: NaiveDateTime,
    origin: ShiftOrigin,
    reason: &str,
) -> DaySplit {
    if end <= start {
        return DaySplit::empty();
    }

    let start_day = start.date();
    let start_clock = ClockTime::from_naive_time(start.time());

    // A midnight end belongs to the day before, as 2400
    let (end_day, end_clock) = if end.time() == NaiveTime::MIN {
        (end.date() - Duration::days(1), ClockTime::END_OF_DAY)
    } else {
        (end.date(), ClockTime::from_naive_time(end.time()))
    };

    if end_day == start_day {
        if start_clock >= end_clock {
            return DaySplit::empty();
        }
        return DaySplit {
            shifts: vec![Shift::new(start_day, start_clock, end_clock, origin, reason)],
            overflow_days: 0,
        };
    }

    let mut shifts = vec![Shift::new(
        start_day,
        start_clock,
        ClockTime::END_OF_DAY,
        origin,
        reason,
    )];
    if end_clock > ClockTime::MIDNIGHT {
        shifts.push(Shift::new(
            end_day,
            ClockTime::MIDNIGHT,
            end_clock,
            origin,
            reason,
        ));
    }

    DaySplit {
        shifts,
        overflow_days: (end_day - start_day).num_days() - 1,
    }
}

//! Manual overtime entry parsing.
//!
//! A manual entry is a start stamp plus a duration. Parsing validates both,
//! computes the exact end instant and cuts the interval at midnight.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::day_split::{at_clock, split_at_midnight};
use crate::error::{EngineError, EngineResult};
use crate::models::{ClockTime, ManualDutyEntry, Shift, ShiftOrigin, compact_date};

const MILLIS_PER_HOUR: Decimal = Decimal::from_parts(3_600_000, 0, 0, false, 0);

/// The shifts produced by one manual entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualSplit {
    /// Start date of the entry.
    pub date: NaiveDate,
    /// Zero, one or two single-day shifts.
    pub shifts: Vec<Shift>,
    /// Days skipped between the first and last shift when the entry ran
    /// two or more days past its start.
    pub overflow_days: i64,
}

impl ManualSplit {
    /// Returns true when the entry had a zero duration.
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }
}

/// Parses the `YYYYMMDDHHMM` start stamp of an entry.
pub fn parse_start_stamp(stamp: &str) -> EngineResult<NaiveDateTime> {
    if stamp.len() != 12 || !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EngineError::InvalidDate {
            value: stamp.to_string(),
        });
    }
    let date = compact_date::parse(&stamp[..8])?;
    let time = ClockTime::parse_start(&stamp[8..])?;
    Ok(at_clock(date, time))
}

/// Parses one manual entry into shifts.
///
/// The end is the start plus the entered hours, computed at millisecond
/// precision and truncated to the minute when cut into shifts.
///
/// # Errors
///
/// Returns [`EngineError::InvalidEntry`] when the stamp is not a valid
/// `YYYYMMDDHHMM` value or the hours are not a non-negative number.
///
/// # Example
///
/// ```
/// use duty_hours_engine::calculation::parse_manual_entry;
/// use duty_hours_engine::models::ManualDutyEntry;
///
/// let entry = ManualDutyEntry::new("Dr. A", "202506032300", 3.0, "night call");
/// let split = parse_manual_entry(&entry).unwrap();
///
/// assert_eq!(split.shifts.len(), 2);
/// assert_eq!(split.shifts[0].end.to_string(), "2400");
/// assert_eq!(split.shifts[1].end.to_string(), "0200");
/// assert!(split.shifts.iter().all(|s| s.reason == "night call"));
///
/// let bad = ManualDutyEntry::new("Dr. A", "202506031460", 1.0, "typo");
/// assert!(parse_manual_entry(&bad).is_err());
/// ```
pub fn parse_manual_entry(entry: &ManualDutyEntry) -> EngineResult<ManualSplit> {
    let invalid = |err: EngineError| EngineError::InvalidEntry {
        entry_id: entry.label().to_string(),
        message: err.to_string(),
    };

    let start = parse_start_stamp(&entry.date_time).map_err(invalid)?;
    let hours = entry.hours.to_decimal().map_err(invalid)?;

    let overflow = || {
        invalid(EngineError::InvalidDuration {
            value: entry.hours.to_string(),
        })
    };
    let millis = hours
        .checked_mul(MILLIS_PER_HOUR)
        .ok_or_else(overflow)?
        .round()
        .to_i64()
        .ok_or_else(overflow)?;
    let end = start
        .checked_add_signed(Duration::milliseconds(millis))
        .ok_or_else(overflow)?;

    let split = split_at_midnight(start, end, ShiftOrigin::Manual, &entry.reason);

    Ok(ManualSplit {
        date: start.date(),
        shifts: split.shifts,
        overflow_days: split.overflow_days,
    })
}

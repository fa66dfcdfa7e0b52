//! Shift model and related types.
//!
//! This module defines the [`Shift`] struct, the atomic single-day unit of duty
//! time, and [`ShiftOrigin`], which records which source of duty evidence
//! produced it.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::ClockTime;
use super::compact_date;

/// Where a shift came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftOrigin {
    /// Derived from a calendar event by the fixed duty pattern.
    Calendar,
    /// Entered by hand as an overtime record.
    Manual,
}

/// Represents one contiguous interval of duty time within a single calendar day.
///
/// A shift never spans midnight: intervals that cross it are split into two
/// shifts where the first ends at `2400` and the second starts at `0000` on the
/// following date. `start` is always strictly before `end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// The calendar day this shift belongs to.
    #[serde(with = "compact_date")]
    pub date: NaiveDate,
    /// Start of the interval (`0000`–`2359`).
    pub start: ClockTime,
    /// End of the interval (`0001`–`2400`).
    pub end: ClockTime,
    /// Which evidence source produced the shift.
    pub origin: ShiftOrigin,
    /// Free-text reason or overtime-type code.
    pub reason: String,
}

impl Shift {
    /// Creates a new shift.
    pub fn new(
        date: NaiveDate,
        start: ClockTime,
        end: ClockTime,
        origin: ShiftOrigin,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            date,
            start,
            end,
            origin,
            reason: reason.into(),
        }
    }

    /// Returns the length of the shift in whole minutes.
    ///
    /// # Examples
    ///
    /// ```
    /// use duty_hours_engine::models::{ClockTime, Shift, ShiftOrigin};
    /// use chrono::NaiveDate;
    ///
    /// let shift = Shift::new(
    ///     NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
    ///     ClockTime::parse_start("1600").unwrap(),
    ///     ClockTime::END_OF_DAY,
    ///     ShiftOrigin::Calendar,
    ///     "10",
    /// );
    /// assert_eq!(shift.duration_minutes(), 480);
    /// ```
    pub fn duration_minutes(&self) -> i64 {
        i64::from(self.end.minutes()) - i64::from(self.start.minutes())
    }

    /// Returns true when the shift respects the single-day invariant:
    /// a real start time strictly before the end.
    pub fn is_well_formed(&self) -> bool {
        !self.start.is_end_of_day() && self.start < self.end
    }

    /// Returns the day of the week for the shift.
    pub fn day_of_week(&self) -> Weekday {
        self.date.weekday()
    }

    /// Returns true for manually entered shifts.
    pub fn is_manual(&self) -> bool {
        self.origin == ShiftOrigin::Manual
    }
}

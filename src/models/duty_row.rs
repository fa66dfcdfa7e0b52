//! Finalized duty row model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ClockTime, HourBucket, ShiftOrigin, compact_date};

/// One line of a member's monthly duty report.
///
/// Rows are ordered by `(date, start)` within a report.
///
/// # Example
///
/// ```
/// use duty_hours_engine::models::{ClockTime, DutyRow, HourBucket, ShiftOrigin};
/// use chrono::NaiveDate;
///
/// let row = DutyRow {
///     date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
///     weekday: "二".to_string(),
///     start: ClockTime::parse_start("1400").unwrap(),
///     end: ClockTime::parse_end("1530").unwrap(),
///     hours: HourBucket::ZERO,
///     reason: "consult".to_string(),
///     origin: ShiftOrigin::Manual,
/// };
/// assert!(serde_json::to_string(&row).unwrap().contains("\"date\":\"20250603\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyRow {
    /// Calendar day of the shift.
    #[serde(with = "compact_date")]
    pub date: NaiveDate,
    /// Single-character weekday label.
    pub weekday: String,
    /// Shift start.
    pub start: ClockTime,
    /// Shift end.
    pub end: ClockTime,
    /// Classified hours.
    pub hours: HourBucket,
    /// Reason or overtime-type code.
    pub reason: String,
    /// Evidence source.
    pub origin: ShiftOrigin,
}

impl DutyRow {
    /// Total classified hours of the row.
    pub fn total_hours(&self) -> Decimal {
        self.hours.total()
    }

    /// Sort key used for report ordering.
    pub fn sort_key(&self) -> (NaiveDate, ClockTime) {
        (self.date, self.start)
    }
}

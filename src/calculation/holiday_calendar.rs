//! Holiday lookup.
//!
//! [`HolidayCalendar`] is a read-only snapshot of the holiday table. It is
//! built once per run and passed by reference (or shared behind an `Arc`) to
//! every computation that needs day status; there is no global instance and
//! no way to mutate it after construction.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use tracing::{debug, warn};

use crate::models::{DayStatus, HolidayRecord, YearMonth, compact_date};

/// Weekday labels, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["一", "二", "三", "四", "五", "六", "日"];

/// Label returned for dates that cannot be parsed.
pub const UNKNOWN_WEEKDAY: &str = "未知";

/// Upper bound, in days, for next/previous working day searches.
const WORKING_DAY_SEARCH_LIMIT: i64 = 366;

/// Returns the weekday label of a date.
pub fn weekday_label(date: NaiveDate) -> &'static str {
    WEEKDAY_LABELS[date.weekday().num_days_from_monday() as usize]
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DayEntry {
    status: DayStatus,
    note: String,
}

/// Read-only lookup of day status by date.
///
/// Dates absent from the table are ordinary working days.
///
/// # Example
///
/// ```
/// use duty_hours_engine::calculation::HolidayCalendar;
/// use duty_hours_engine::models::DayStatus;
/// use chrono::NaiveDate;
///
/// let calendar = HolidayCalendar::from_statuses([
///     (NaiveDate::from_ymd_opt(2025, 6, 7).unwrap(), DayStatus::Holiday),
///     (NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(), DayStatus::Special),
/// ]);
///
/// assert!(calendar.is_holiday("20250607"));
/// assert!(calendar.is_holiday("20250612"));
/// assert!(calendar.is_special("20250612"));
/// assert!(!calendar.is_holiday("20250603"));
/// assert!(!calendar.is_holiday("garbage"));
/// assert_eq!(calendar.weekday("20250607"), "六");
/// assert_eq!(calendar.weekday("garbage"), "未知");
/// ```
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    days: HashMap<NaiveDate, DayEntry>,
}

impl HolidayCalendar {
    /// Builds a calendar from `(date, status)` pairs. Later pairs win.
    pub fn from_statuses(statuses: impl IntoIterator<Item = (NaiveDate, DayStatus)>) -> Self {
        let days = statuses
            .into_iter()
            .map(|(date, status)| {
                (
                    date,
                    DayEntry {
                        status,
                        note: String::new(),
                    },
                )
            })
            .collect();
        Self { days }
    }

    /// Builds a calendar from holiday records, keeping their notes.
    ///
    /// A record flagged special is stored as [`DayStatus::Special`]; one
    /// flagged holiday as [`DayStatus::Holiday`]; anything else as a workday.
    pub fn from_records(records: impl IntoIterator<Item = HolidayRecord>) -> Self {
        let days = records
            .into_iter()
            .map(|record| {
                let status = if record.is_special {
                    DayStatus::Special
                } else if record.is_holiday {
                    DayStatus::Holiday
                } else {
                    DayStatus::Workday
                };
                (
                    record.date,
                    DayEntry {
                        status,
                        note: record.note,
                    },
                )
            })
            .collect();
        Self { days }
    }

    /// Number of dates in the table.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true when the table has no dates.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Returns true when `date` (`YYYYMMDD`) is recorded as a holiday or a
    /// special day. Malformed dates are logged and report `false`.
    pub fn is_holiday(&self, date: &str) -> bool {
        self.parse_lookup(date)
            .is_some_and(|d| self.treats_as_holiday(d))
    }

    /// Returns true when `date` (`YYYYMMDD`) is recorded as a special day.
    pub fn is_special(&self, date: &str) -> bool {
        self.parse_lookup(date)
            .is_some_and(|d| self.day_status(d).is_special())
    }

    /// Returns the weekday label of `date` (`YYYYMMDD`), or `未知` when it
    /// cannot be parsed.
    pub fn weekday(&self, date: &str) -> &'static str {
        self.parse_lookup(date)
            .map(weekday_label)
            .unwrap_or(UNKNOWN_WEEKDAY)
    }

    fn parse_lookup(&self, date: &str) -> Option<NaiveDate> {
        match compact_date::parse(date) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                warn!(date = %date, "Malformed date in holiday lookup");
                None
            }
        }
    }

    /// The recorded status of a date; absent dates are workdays.
    pub fn day_status(&self, date: NaiveDate) -> DayStatus {
        self.days
            .get(&date)
            .map(|entry| entry.status)
            .unwrap_or_default()
    }

    /// Returns true when hours on `date` are classified as holiday hours:
    /// the date is a holiday or a special day.
    pub fn treats_as_holiday(&self, date: NaiveDate) -> bool {
        self.day_status(date).is_holiday()
    }

    /// The holiday record of a date. Absent dates yield a non-holiday record
    /// with an empty note.
    pub fn record(&self, date: NaiveDate) -> HolidayRecord {
        match self.days.get(&date) {
            Some(entry) => HolidayRecord::new(date, entry.status).with_note(entry.note.clone()),
            None => HolidayRecord::new(date, DayStatus::Workday),
        }
    }

    /// Returns true when `date` is absent from the table or recorded as a
    /// workday. Rest days are not working days.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        self.day_status(date) == DayStatus::Workday
    }

    /// Dates in `period` recorded as holidays, special days included.
    pub fn holidays_in_month(&self, period: YearMonth) -> Vec<NaiveDate> {
        let holidays: Vec<NaiveDate> = period
            .days()
            .into_iter()
            .filter(|d| self.treats_as_holiday(*d))
            .collect();
        debug!(period = %period, count = holidays.len(), "Holidays in month");
        holidays
    }

    /// Dates in `period` recorded as special days.
    pub fn special_days_in_month(&self, period: YearMonth) -> Vec<NaiveDate> {
        period
            .days()
            .into_iter()
            .filter(|d| self.day_status(*d).is_special())
            .collect()
    }

    /// Working days in `period`.
    pub fn working_days_in_month(&self, period: YearMonth) -> Vec<NaiveDate> {
        period
            .days()
            .into_iter()
            .filter(|d| self.is_working_day(*d))
            .collect()
    }

    /// One record per day of `period`.
    pub fn month_info(&self, period: YearMonth) -> Vec<HolidayRecord> {
        period.days().into_iter().map(|d| self.record(d)).collect()
    }

    /// The first working day strictly after `date`, searching up to a year.
    pub fn next_working_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        (1..=WORKING_DAY_SEARCH_LIMIT)
            .map(|offset| date + Duration::days(offset))
            .find(|d| self.is_working_day(*d))
    }

    /// The last working day strictly before `date`, searching up to a year.
    pub fn previous_working_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        (1..=WORKING_DAY_SEARCH_LIMIT)
            .map(|offset| date - Duration::days(offset))
            .find(|d| self.is_working_day(*d))
    }
}

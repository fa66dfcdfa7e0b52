//! Report period model.
//!
//! This module contains the [`YearMonth`] type, the `YYYYMM` period a duty
//! report is produced for.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// Hour on the first day of the following month up to which calendar events
/// should be fetched, so that overnight duty starting on the last day is seen.
pub const EVENT_WINDOW_SPILL_HOURS: i64 = 9;

/// A calendar month, written `YYYYMM`.
///
/// # Example
///
/// ```
/// use duty_hours_engine::models::YearMonth;
/// use chrono::NaiveDate;
///
/// let period = YearMonth::parse("202506").unwrap();
/// assert_eq!(period.to_string(), "202506");
/// assert!(period.contains(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()));
/// assert!(!period.contains(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()));
/// assert_eq!(period.days().len(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a period, returning `None` for an invalid month.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The period a date falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parses a strict `YYYYMM` string.
    pub fn parse(value: &str) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidYearMonth {
            value: value.to_string(),
        };

        if value.len() != 6 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = value[..4].parse().map_err(|_| invalid())?;
        let month: u32 = value[4..].parse().map_err(|_| invalid())?;

        Self::new(year, month).ok_or_else(invalid)
    }

    /// The year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month, 1 through 12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // Constructors guarantee (year, month, 1) is a real date
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The following month.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    /// Checks if a given date falls within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Every date of the month in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        let last = self.last_day();
        self.first_day()
            .iter_days()
            .take_while(|d| *d <= last)
            .collect()
    }

    /// The half-open window calendar events should be fetched for: from the
    /// first instant of the month to 09:00 on the first day of the next one.
    pub fn event_window(&self) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.first_day().and_time(NaiveTime::MIN);
        let end = self.next().first_day().and_time(NaiveTime::MIN)
            + Duration::hours(EVENT_WINDOW_SPILL_HOURS);
        (start, end)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        YearMonth::parse(&raw).map_err(serde::de::Error::custom)
    }
}

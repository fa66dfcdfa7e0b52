//! Holiday table models.
//!
//! The holiday table classifies calendar days. The source data uses a
//! four-valued status; classification only cares whether a day is treated as a
//! holiday, which covers both regular holidays and special days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::compact_date;

/// Day classification as recorded in the holiday source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// A normal working day (source code `0`).
    #[default]
    Workday,
    /// A rest day that is not a holiday, such as a swapped weekend (code `1`).
    RestDay,
    /// A public holiday or weekend (code `2`).
    Holiday,
    /// A special day, treated as a holiday for hour classification (code `3`).
    Special,
}

impl DayStatus {
    /// Maps the numeric source code. Unknown codes return `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use duty_hours_engine::models::DayStatus;
    ///
    /// assert_eq!(DayStatus::from_code(2), Some(DayStatus::Holiday));
    /// assert_eq!(DayStatus::from_code(3), Some(DayStatus::Special));
    /// assert_eq!(DayStatus::from_code(7), None);
    /// ```
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(DayStatus::Workday),
            1 => Some(DayStatus::RestDay),
            2 => Some(DayStatus::Holiday),
            3 => Some(DayStatus::Special),
            _ => None,
        }
    }

    /// Returns true for statuses classified as holiday hours.
    pub fn is_holiday(self) -> bool {
        matches!(self, DayStatus::Holiday | DayStatus::Special)
    }

    /// Returns true for special days.
    pub fn is_special(self) -> bool {
        self == DayStatus::Special
    }
}

/// The holiday status of one date.
///
/// # Example
///
/// ```
/// use duty_hours_engine::models::{DayStatus, HolidayRecord};
/// use chrono::NaiveDate;
///
/// let record = HolidayRecord::new(NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(), DayStatus::Special);
/// assert!(record.is_holiday);
/// assert!(record.is_special);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    /// The date this record describes.
    #[serde(with = "compact_date")]
    pub date: NaiveDate,
    /// Whether the date counts as a holiday (special days included).
    pub is_holiday: bool,
    /// Whether the date is a special day.
    pub is_special: bool,
    /// Optional description from the source table.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
}

impl HolidayRecord {
    /// Builds a record from a day status.
    pub fn new(date: NaiveDate, status: DayStatus) -> Self {
        Self {
            date,
            is_holiday: status.is_holiday(),
            is_special: status.is_special(),
            note: String::new(),
        }
    }

    /// Attaches a note to the record.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(!DayStatus::Workday.is_holiday());
        assert!(!DayStatus::RestDay.is_holiday());
        assert!(DayStatus::Holiday.is_holiday());
        assert!(DayStatus::Special.is_holiday());
        assert!(DayStatus::Special.is_special());
        assert!(!DayStatus::Holiday.is_special());
    }

    #[test]
    fn test_default_status_is_workday() {
        assert_eq!(DayStatus::default(), DayStatus::Workday);
    }

    #[test]
    fn test_record_serialization_omits_empty_note() {
        let record = HolidayRecord::new(
            NaiveDate::from_ymd_opt(2025, 6, 7).unwrap(),
            DayStatus::Holiday,
        );
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"date":"20250607","is_holiday":true,"is_special":false}"#
        );

        let noted = record.with_note("weekend");
        assert!(serde_json::to_string(&noted).unwrap().contains("\"note\":\"weekend\""));
    }
}

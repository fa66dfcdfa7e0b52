//! Configuration types for duty hour aggregation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the engine settings file and the holiday table.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::ClockTime;

fn default_holiday_file() -> String {
    "holidays.json".to_string()
}

/// Engine settings, read from `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Holiday table file, relative to the configuration directory.
    #[serde(default = "default_holiday_file")]
    pub holiday_file: String,
    /// Optional roster file, relative to the configuration directory.
    #[serde(default)]
    pub members_file: Option<String>,
    /// Fixed pattern applied to calendar duty events.
    #[serde(default)]
    pub calendar_duty: CalendarDutyPattern,
    /// Tier thresholds for hour classification.
    #[serde(default)]
    pub classification: ClassificationRules,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            holiday_file: default_holiday_file(),
            members_file: None,
            calendar_duty: CalendarDutyPattern::default(),
            classification: ClassificationRules::default(),
        }
    }
}

/// The shift pair generated for each calendar duty event.
///
/// A duty starting on a holiday runs from `holiday_start` through midnight;
/// on any other day it runs from `workday_start`. Both continue on the next
/// day until `next_day_end`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CalendarDutyPattern {
    /// Start time on holidays and special days.
    pub holiday_start: ClockTime,
    /// Start time on ordinary days.
    pub workday_start: ClockTime,
    /// End time of the morning-after shift.
    pub next_day_end: ClockTime,
    /// Overtime-type code recorded on generated rows.
    pub reason_code: String,
}

impl CalendarDutyPattern {
    /// Checks that the pattern always yields a linked pair of shifts.
    ///
    /// Both start times must fall before `2400` and the morning end must
    /// fall after `0000`.
    ///
    /// # Example
    ///
    /// ```
    /// use duty_hours_engine::config::CalendarDutyPattern;
    /// use duty_hours_engine::models::ClockTime;
    ///
    /// assert!(CalendarDutyPattern::default().validate().is_ok());
    ///
    /// let pattern = CalendarDutyPattern {
    ///     next_day_end: ClockTime::MIDNIGHT,
    ///     ..CalendarDutyPattern::default()
    /// };
    /// assert!(pattern.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), String> {
        for (field, start) in [
            ("holiday_start", self.holiday_start),
            ("workday_start", self.workday_start),
        ] {
            if start.is_end_of_day() {
                return Err(format!("calendar_duty.{} must be before 2400", field));
            }
        }
        if self.next_day_end == ClockTime::MIDNIGHT {
            return Err("calendar_duty.next_day_end must be after 0000".to_string());
        }
        Ok(())
    }
}

impl Default for CalendarDutyPattern {
    fn default() -> Self {
        Self {
            holiday_start: ClockTime::from_hm(8, 0).unwrap_or(ClockTime::MIDNIGHT),
            workday_start: ClockTime::from_hm(16, 0).unwrap_or(ClockTime::MIDNIGHT),
            next_day_end: ClockTime::from_hm(8, 0).unwrap_or(ClockTime::MIDNIGHT),
            reason_code: "10".to_string(),
        }
    }
}

/// Tier thresholds, in hours, for splitting a shift across categories.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClassificationRules {
    /// Width of the first ordinary-day tier.
    pub first_tier_hours: Decimal,
    /// Width of the second ordinary-day tier.
    pub second_tier_hours: Decimal,
    /// Holiday hours paid at the base holiday category.
    pub holiday_base_hours: Decimal,
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self {
            first_tier_hours: Decimal::TWO,
            second_tier_hours: Decimal::TWO,
            holiday_base_hours: Decimal::from(8),
        }
    }
}

/// One row of the holiday source table.
///
/// The source is keyed in Chinese; `status` arrives either as a string or a
/// number, so it is kept loose and interpreted by the loader.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaySourceEntry {
    /// Date, `YYYYMMDD`.
    #[serde(rename = "西元日期")]
    pub date: String,
    /// Day status code: 0 workday, 1 rest day, 2 holiday, 3 special.
    #[serde(rename = "是否放假", default)]
    pub status: serde_json::Value,
    /// Free-text note.
    #[serde(rename = "備註", default)]
    pub note: Option<String>,
}

impl HolidaySourceEntry {
    /// The numeric status code, when the source value is an integer or an
    /// integer string.
    pub fn status_code(&self) -> Option<i64> {
        match &self.status {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

//! `YYYYMMDD` date helpers.
//!
//! Holiday tables, manual entries and rendered duty rows all key dates as
//! eight-digit strings. This module parses and formats that form and doubles
//! as a `#[serde(with = "...")]` adapter for [`NaiveDate`] fields.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{EngineError, EngineResult};

/// The chrono format string for compact dates.
pub const FORMAT: &str = "%Y%m%d";

/// Parses a strict `YYYYMMDD` string.
///
/// # Example
///
/// ```
/// use duty_hours_engine::models::compact_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     compact_date::parse("20250603").unwrap(),
///     NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()
/// );
/// assert!(compact_date::parse("2025063").is_err());
/// assert!(compact_date::parse("20250231").is_err());
/// ```
pub fn parse(value: &str) -> EngineResult<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EngineError::InvalidDate {
            value: value.to_string(),
        });
    }
    NaiveDate::parse_from_str(value, FORMAT).map_err(|_| EngineError::InvalidDate {
        value: value.to_string(),
    })
}

/// Formats a date as `YYYYMMDD`.
pub fn format(date: NaiveDate) -> String {
    date.format(FORMAT).to_string()
}

/// Serde serializer for `#[serde(with = "compact_date")]`.
pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(FORMAT))
}

/// Serde deserializer for `#[serde(with = "compact_date")]`.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

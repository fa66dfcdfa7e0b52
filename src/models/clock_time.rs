//! Wall-clock time of day in `HHMM` notation.
//!
//! Duty rows carry start and end times as four-digit `HHMM` strings, with the
//! special end marker `2400` meaning "midnight at the end of this day". The
//! [`ClockTime`] newtype stores minutes since midnight so that comparisons and
//! duration arithmetic stay integral, while rendering and serializing back to
//! the `HHMM` form.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// Number of minutes in one calendar day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day between `0000` and `2400` inclusive.
///
/// Ordering follows the clock, which for `HHMM` strings is the same as lexical
/// ordering.
///
/// # Example
///
/// ```
/// use duty_hours_engine::models::ClockTime;
///
/// let start = ClockTime::parse_start("1600").unwrap();
/// let end = ClockTime::parse_end("2400").unwrap();
/// assert!(start < end);
/// assert_eq!(end.to_string(), "2400");
/// assert_eq!(end.minutes() - start.minutes(), 480);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    /// `0000`, the start of a day.
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// `2400`, the end of a day.
    pub const END_OF_DAY: ClockTime = ClockTime(MINUTES_PER_DAY);

    /// Builds a clock time from hours and minutes. `24:00` is accepted as the
    /// end-of-day marker; anything past it is not.
    pub const fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour > 24 || minute >= 60 || (hour == 24 && minute != 0) {
            return None;
        }
        Some(ClockTime(hour * 60 + minute))
    }

    /// Builds a clock time from minutes since midnight (0..=1440).
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes <= MINUTES_PER_DAY).then_some(ClockTime(minutes))
    }

    /// Converts a chrono time, dropping seconds.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        // hour() < 24 and minute() < 60, so this stays below MINUTES_PER_DAY
        ClockTime((time.hour() * 60 + time.minute()) as u16)
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Returns true for the `2400` marker.
    pub fn is_end_of_day(self) -> bool {
        self.0 == MINUTES_PER_DAY
    }

    /// Parses a shift start time. Only real clock times (`0000`–`2359`) are
    /// accepted.
    pub fn parse_start(value: &str) -> EngineResult<Self> {
        let time = Self::parse_end(value)?;
        if time.is_end_of_day() {
            return Err(EngineError::InvalidTime {
                value: value.to_string(),
            });
        }
        Ok(time)
    }

    /// Parses a shift end time, which may also be the `2400` marker.
    pub fn parse_end(value: &str) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidTime {
            value: value.to_string(),
        };

        if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let hour: u16 = value[..2].parse().map_err(|_| invalid())?;
        let minute: u16 = value[2..].parse().map_err(|_| invalid())?;

        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for ClockTime {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_end(s)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ClockTime::parse_end(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        ClockTime::parse_end(s).unwrap()
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        for raw in ["0000", "0800", "1530", "2359", "2400"] {
            assert_eq!(t(raw).to_string(), raw);
        }
    }

    #[test]
    fn test_parse_start_rejects_end_of_day_marker() {
        assert!(ClockTime::parse_start("2400").is_err());
        assert_eq!(ClockTime::parse_start("2359").unwrap().minutes(), 1439);
    }

    #[test]
    fn test_parse_rejects_malformed_values() {
        for raw in ["", "800", "08:00", "24 0", "2401", "2500", "1260", "abcd", "00000"] {
            assert!(
                ClockTime::parse_end(raw).is_err(),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_ordering_matches_lexical_hhmm_ordering() {
        let mut times = vec![t("2400"), t("0000"), t("1600"), t("0800"), t("1530")];
        times.sort();
        let rendered: Vec<String> = times.iter().map(ToString::to_string).collect();
        let mut lexical = rendered.clone();
        lexical.sort();
        assert_eq!(rendered, lexical);
    }

    #[test]
    fn test_from_naive_time_drops_seconds() {
        let time = NaiveTime::from_hms_opt(15, 30, 45).unwrap();
        assert_eq!(ClockTime::from_naive_time(time).to_string(), "1530");
    }

    #[test]
    fn test_from_minutes_bounds() {
        assert_eq!(ClockTime::from_minutes(1440), Some(ClockTime::END_OF_DAY));
        assert_eq!(ClockTime::from_minutes(1441), None);
    }

    #[test]
    fn test_serialization_uses_hhmm_string() {
        let json = serde_json::to_string(&t("0800")).unwrap();
        assert_eq!(json, "\"0800\"");

        let parsed: ClockTime = serde_json::from_str("\"2400\"").unwrap();
        assert!(parsed.is_end_of_day());

        assert!(serde_json::from_str::<ClockTime>("\"8am\"").is_err());
    }
}

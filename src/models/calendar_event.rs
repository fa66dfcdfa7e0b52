//! Calendar event model.
//!
//! Events arrive from the calendar provider in its own shape: a `start` and an
//! `end` object, each carrying either a `dateTime` (timed event) or a `date`
//! (all-day event). Only the start date drives duty generation; parsing is kept
//! lazy so one malformed event cannot poison a whole batch at deserialization
//! time.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::compact_date;
use crate::error::{EngineError, EngineResult};

/// The start or end marker of a calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    /// Timestamp of a timed event, RFC 3339 or naive ISO 8601.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// Date of an all-day event, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl EventTime {
    /// An all-day marker.
    pub fn all_day(date: impl Into<String>) -> Self {
        Self {
            date_time: None,
            date: Some(date.into()),
        }
    }

    /// A timed marker.
    pub fn timed(date_time: impl Into<String>) -> Self {
        Self {
            date_time: Some(date_time.into()),
            date: None,
        }
    }

    /// Resolves the calendar date of this marker.
    ///
    /// A `dateTime` wins over `date`. Offsets are honoured: the date is the
    /// local date in the offset the timestamp was written in.
    ///
    /// # Example
    ///
    /// ```
    /// use duty_hours_engine::models::EventTime;
    /// use chrono::NaiveDate;
    ///
    /// let start = EventTime::timed("2025-06-03T23:30:00+08:00");
    /// assert_eq!(start.resolve_date().unwrap(), NaiveDate::from_ymd_opt(2025, 6, 3).unwrap());
    ///
    /// let all_day = EventTime::all_day("2025-06-07");
    /// assert_eq!(all_day.resolve_date().unwrap(), NaiveDate::from_ymd_opt(2025, 6, 7).unwrap());
    /// ```
    pub fn resolve_date(&self) -> EngineResult<NaiveDate> {
        match (&self.date_time, &self.date) {
            (Some(date_time), _) => parse_event_date_time(date_time),
            (None, Some(date)) => parse_event_date(date),
            (None, None) => Err(EngineError::InvalidDate {
                value: "<missing start date>".to_string(),
            }),
        }
    }
}

fn parse_event_date_time(raw: &str) -> EngineResult<NaiveDate> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|parsed| parsed.date())
        .ok_or_else(|| EngineError::InvalidDate {
            value: raw.to_string(),
        })
}

fn parse_event_date(raw: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").or_else(|_| compact_date::parse(raw))
}

/// A raw event from a member's duty calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Provider-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Event title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// When the event starts.
    #[serde(default)]
    pub start: EventTime,
    /// When the event ends. Only inspected to flag multi-day events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<EventTime>,
}

impl CalendarEvent {
    /// Creates an all-day event starting on `date` (`YYYY-MM-DD`).
    pub fn all_day(summary: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: None,
            summary: Some(summary.into()),
            start: EventTime::all_day(date),
            end: None,
        }
    }

    /// A short human-readable handle for logs and errors.
    pub fn label(&self) -> &str {
        self.id
            .as_deref()
            .or(self.summary.as_deref())
            .unwrap_or("<untitled event>")
    }

    /// Resolves the start date, wrapping failures as [`EngineError::InvalidEvent`].
    pub fn start_date(&self) -> EngineResult<NaiveDate> {
        self.start
            .resolve_date()
            .map_err(|err| EngineError::InvalidEvent {
                event_id: self.label().to_string(),
                message: err.to_string(),
            })
    }

    /// Resolves the end date when present and parsable.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end.as_ref().and_then(|end| end.resolve_date().ok())
    }

    /// Returns true when the event reaches past the morning after its start.
    ///
    /// All-day events carry an exclusive end date, and the duty pattern
    /// itself runs into the next morning, so only an end two or more days
    /// after the start counts.
    pub fn spans_multiple_days(&self) -> bool {
        match (self.start.resolve_date().ok(), self.end_date()) {
            (Some(start), Some(end)) => (end - start).num_days() > 1,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_deserialize_provider_shape() {
        let json = r#"{
            "id": "evt_001",
            "summary": "On call",
            "start": { "dateTime": "2025-06-03T17:00:00+08:00" },
            "end": { "dateTime": "2025-06-04T08:00:00+08:00" }
        }"#;

        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.label(), "evt_001");
        assert_eq!(event.start_date().unwrap(), date(2025, 6, 3));
        assert_eq!(event.end_date(), Some(date(2025, 6, 4)));
        assert!(!event.spans_multiple_days());
    }

    #[test]
    fn test_offset_decides_local_date() {
        // 2025-06-03 23:30 in UTC+8 is still June 3 locally
        let event = CalendarEvent {
            id: None,
            summary: None,
            start: EventTime::timed("2025-06-03T23:30:00+08:00"),
            end: None,
        };
        assert_eq!(event.start_date().unwrap(), date(2025, 6, 3));
    }

    #[test]
    fn test_naive_date_time_is_accepted() {
        let start = EventTime::timed("2025-06-03T16:00:00");
        assert_eq!(start.resolve_date().unwrap(), date(2025, 6, 3));
    }

    #[test]
    fn test_date_time_wins_over_date() {
        let start = EventTime {
            date_time: Some("2025-06-05T08:00:00+08:00".to_string()),
            date: Some("2025-06-01".to_string()),
        };
        assert_eq!(start.resolve_date().unwrap(), date(2025, 6, 5));
    }

    #[test]
    fn test_missing_start_is_invalid_event() {
        let json = r#"{ "summary": "broken" }"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();

        match event.start_date() {
            Err(EngineError::InvalidEvent { event_id, .. }) => assert_eq!(event_id, "broken"),
            other => panic!("Expected InvalidEvent, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_start_is_invalid_event() {
        let event = CalendarEvent::all_day("typo", "2025-13-40");
        assert!(event.start_date().is_err());
    }

    #[test]
    fn test_multi_day_all_day_event() {
        let event = CalendarEvent {
            id: Some("conf".to_string()),
            summary: None,
            start: EventTime::all_day("2025-06-10"),
            end: Some(EventTime::all_day("2025-06-13")),
        };
        assert!(event.spans_multiple_days());

        let single = CalendarEvent {
            end: Some(EventTime::all_day("2025-06-11")),
            ..event
        };
        assert!(!single.spans_multiple_days());
    }
}

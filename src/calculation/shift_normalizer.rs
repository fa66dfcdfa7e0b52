//! Calendar duty normalization.
//!
//! A duty calendar event only says "this person is on call starting this
//! day". The normalizer turns it into the fixed overnight pair of shifts:
//! from the pattern start time through midnight, then from midnight to the
//! morning end time on the following day.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use tracing::{debug, warn};

use super::HolidayCalendar;
use super::day_split::{at_clock, split_at_midnight};
use crate::config::CalendarDutyPattern;
use crate::error::EngineResult;
use crate::models::{CalendarEvent, Shift, ShiftOrigin, YearMonth};

/// What happened to one calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeOutcome {
    /// The event triggered a shift pair.
    Generated(Vec<Shift>),
    /// Another event already triggered the pair for this start date.
    Duplicate(NaiveDate),
    /// The start date is outside the target month.
    OutsideMonth(NaiveDate),
}

/// Turns calendar events into shift pairs for one member-month.
///
/// The normalizer is stateful: it remembers which start dates have already
/// triggered a pair, so only the first event per date counts. Use one
/// normalizer per member-month.
///
/// # Example
///
/// ```
/// use duty_hours_engine::calculation::{HolidayCalendar, NormalizeOutcome, ShiftNormalizer};
/// use duty_hours_engine::config::CalendarDutyPattern;
/// use duty_hours_engine::models::{CalendarEvent, YearMonth};
///
/// let calendar = HolidayCalendar::default();
/// let pattern = CalendarDutyPattern::default();
/// let period = YearMonth::parse("202506").unwrap();
/// let mut normalizer = ShiftNormalizer::new(&calendar, &pattern, period);
///
/// let event = CalendarEvent::all_day("On call", "2025-06-03");
/// match normalizer.normalize(&event).unwrap() {
///     NormalizeOutcome::Generated(shifts) => {
///         assert_eq!(shifts.len(), 2);
///         assert_eq!(shifts[0].start.to_string(), "1600");
///         assert_eq!(shifts[1].end.to_string(), "0800");
///     }
///     other => panic!("unexpected {:?}", other),
/// }
///
/// // A second event on the same day is a duplicate
/// let again = CalendarEvent::all_day("Also on call", "2025-06-03");
/// assert!(matches!(normalizer.normalize(&again).unwrap(), NormalizeOutcome::Duplicate(_)));
/// ```
#[derive(Debug)]
pub struct ShiftNormalizer<'a> {
    calendar: &'a HolidayCalendar,
    pattern: &'a CalendarDutyPattern,
    period: YearMonth,
    seen: HashSet<NaiveDate>,
}

impl<'a> ShiftNormalizer<'a> {
    /// Creates a normalizer for one member-month.
    pub fn new(
        calendar: &'a HolidayCalendar,
        pattern: &'a CalendarDutyPattern,
        period: YearMonth,
    ) -> Self {
        Self {
            calendar,
            pattern,
            period,
            seen: HashSet::new(),
        }
    }

    /// Normalizes one event.
    ///
    /// Returns [`EngineError::InvalidEvent`] when the event has no usable
    /// start date. Outside-month and duplicate events are not errors.
    ///
    /// [`EngineError::InvalidEvent`]: crate::error::EngineError::InvalidEvent
    pub fn normalize(&mut self, event: &CalendarEvent) -> EngineResult<NormalizeOutcome> {
        let date = event.start_date()?;

        if !self.period.contains(date) {
            debug!(event = %event.label(), date = %date, "Calendar event outside target month");
            return Ok(NormalizeOutcome::OutsideMonth(date));
        }

        if !self.seen.insert(date) {
            warn!(
                event = %event.label(),
                date = %date,
                "Duplicate calendar duty trigger; keeping the first event for this date"
            );
            return Ok(NormalizeOutcome::Duplicate(date));
        }

        Ok(NormalizeOutcome::Generated(self.shift_pair(date)))
    }

    /// The shift pair for a duty starting on `date`, without dedup.
    pub fn shift_pair(&self, date: NaiveDate) -> Vec<Shift> {
        let start_time = if self.calendar.treats_as_holiday(date) {
            self.pattern.holiday_start
        } else {
            self.pattern.workday_start
        };

        let start = at_clock(date, start_time);
        let end = at_clock(date + Duration::days(1), self.pattern.next_day_end);

        split_at_midnight(start, end, ShiftOrigin::Calendar, &self.pattern.reason_code).shifts
    }

    /// Number of distinct start dates that triggered a pair so far.
    pub fn triggered(&self) -> usize {
        self.seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{ClockTime, DayStatus, EventTime, compact_date};

    fn make_date(date_str: &str) -> NaiveDate {
        compact_date::parse(date_str).unwrap()
    }

    fn hm(hour: u16, minute: u16) -> ClockTime {
        ClockTime::from_hm(hour, minute).unwrap()
    }

    fn june() -> YearMonth {
        YearMonth::parse("202506").unwrap()
    }

    fn holidays() -> HolidayCalendar {
        HolidayCalendar::from_statuses([
            (make_date("20250607"), DayStatus::Holiday),
            (make_date("20250608"), DayStatus::Holiday),
            (make_date("20250612"), DayStatus::Special),
        ])
    }

    fn generated(outcome: NormalizeOutcome) -> Vec<String> {
        match outcome {
            NormalizeOutcome::Generated(shifts) => shifts
                .iter()
                .map(|s| {
                    format!(
                        "{} {}-{} {}",
                        compact_date::format(s.date),
                        s.start,
                        s.end,
                        s.reason
                    )
                })
                .collect(),
            other => panic!("Expected Generated, got {:?}", other),
        }
    }

    // ===== SN-001: pair generation =====

    #[test]
    fn test_workday_pair() {
        let calendar = holidays();
        let pattern = CalendarDutyPattern::default();
        let mut normalizer = ShiftNormalizer::new(&calendar, &pattern, june());

        let outcome = normalizer
            .normalize(&CalendarEvent::all_day("On call", "2025-06-03"))
            .unwrap();
        assert_eq!(
            generated(outcome),
            vec!["20250603 1600-2400 10", "20250604 0000-0800 10"]
        );
    }

    #[test]
    fn test_holiday_pair_starts_in_the_morning() {
        let calendar = holidays();
        let pattern = CalendarDutyPattern::default();
        let mut normalizer = ShiftNormalizer::new(&calendar, &pattern, june());

        let outcome = normalizer
            .normalize(&CalendarEvent::all_day("On call", "2025-06-07"))
            .unwrap();
        assert_eq!(
            generated(outcome),
            vec!["20250607 0800-2400 10", "20250608 0000-0800 10"]
        );
    }

    #[test]
    fn test_special_day_uses_holiday_start() {
        let calendar = holidays();
        let pattern = CalendarDutyPattern::default();
        let normalizer = ShiftNormalizer::new(&calendar, &pattern, june());

        let shifts = normalizer.shift_pair(make_date("20250612"));
        assert_eq!(shifts[0].start.to_string(), "0800");
    }

    #[test]
    fn test_timed_event_uses_only_start_date() {
        let calendar = holidays();
        let pattern = CalendarDutyPattern::default();
        let mut normalizer = ShiftNormalizer::new(&calendar, &pattern, june());

        let event = CalendarEvent {
            id: Some("evt".to_string()),
            summary: None,
            start: EventTime::timed("2025-06-03T21:15:00+08:00"),
            end: Some(EventTime::timed("2025-06-04T07:00:00+08:00")),
        };
        assert_eq!(
            generated(normalizer.normalize(&event).unwrap()),
            vec!["20250603 1600-2400 10", "20250604 0000-0800 10"]
        );
    }

    #[test]
    fn test_last_day_of_month_spills_into_next_month() {
        let calendar = holidays();
        let pattern = CalendarDutyPattern::default();
        let mut normalizer = ShiftNormalizer::new(&calendar, &pattern, june());

        let outcome = normalizer
            .normalize(&CalendarEvent::all_day("On call", "2025-06-30"))
            .unwrap();
        assert_eq!(
            generated(outcome),
            vec!["20250630 1600-2400 10", "20250701 0000-0800 10"]
        );
    }

    // ===== SN-002: filtering =====

    #[test]
    fn test_duplicate_start_date_is_dropped() {
        let calendar = holidays();
        let pattern = CalendarDutyPattern::default();
        let mut normalizer = ShiftNormalizer::new(&calendar, &pattern, june());

        let first = CalendarEvent::all_day("On call", "2025-06-03");
        let second = CalendarEvent {
            start: EventTime::timed("2025-06-03T18:00:00+08:00"),
            ..first.clone()
        };

        assert!(matches!(
            normalizer.normalize(&first).unwrap(),
            NormalizeOutcome::Generated(_)
        ));
        assert_eq!(
            normalizer.normalize(&second).unwrap(),
            NormalizeOutcome::Duplicate(make_date("20250603"))
        );
        assert_eq!(normalizer.triggered(), 1);
    }

    #[test]
    fn test_outside_month_is_discarded() {
        let calendar = holidays();
        let pattern = CalendarDutyPattern::default();
        let mut normalizer = ShiftNormalizer::new(&calendar, &pattern, june());

        let outcome = normalizer
            .normalize(&CalendarEvent::all_day("On call", "2025-07-01"))
            .unwrap();
        assert_eq!(outcome, NormalizeOutcome::OutsideMonth(make_date("20250701")));
        assert_eq!(normalizer.triggered(), 0);
    }

    #[test]
    fn test_invalid_event_is_an_error() {
        let calendar = holidays();
        let pattern = CalendarDutyPattern::default();
        let mut normalizer = ShiftNormalizer::new(&calendar, &pattern, june());

        let event = CalendarEvent::all_day("broken", "not-a-date");
        match normalizer.normalize(&event) {
            Err(EngineError::InvalidEvent { event_id, .. }) => assert_eq!(event_id, "broken"),
            other => panic!("Expected InvalidEvent, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_pattern() {
        let calendar = holidays();
        let pattern = CalendarDutyPattern {
            workday_start: hm(17, 30),
            next_day_end: hm(9, 0),
            reason_code: "11".to_string(),
            ..CalendarDutyPattern::default()
        };
        let normalizer = ShiftNormalizer::new(&calendar, &pattern, june());

        let shifts = normalizer.shift_pair(make_date("20250603"));
        assert_eq!(shifts[0].start.to_string(), "1730");
        assert_eq!(shifts[1].end.to_string(), "0900");
        assert!(shifts.iter().all(|s| s.reason == "11"));
    }
}

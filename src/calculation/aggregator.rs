//! Member-month aggregation.
//!
//! The aggregator is the single entry point that turns one member's calendar
//! events and manual entries into ordered, classified duty rows:
//!
//! 1. Normalize calendar events (first event per start date wins).
//! 2. Parse the member's manual entries for the month.
//! 3. Collect shifts by date, calendar shifts before manual ones.
//! 4. Drop shifts that fall outside the month.
//! 5. Classify each shift and attach the weekday label.
//! 6. Sort by `(date, start)`, keeping insertion order for ties.
//!
//! Bad entries never abort the run; each one becomes a warning in the
//! [`AggregationTrace`].

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::holiday_calendar::weekday_label;
use super::{
    HolidayCalendar, HourClassifier, NormalizeOutcome, ShiftNormalizer, parse_manual_entry,
};
use crate::config::EngineSettings;
use crate::models::{
    AggregationTrace, AggregationWarning, CalendarEvent, DutyRow, HourTotals, ManualDutyEntry,
    Member, MemberMonthReport, Shift, WarningCode, YearMonth,
};

/// Version string stamped on every report.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rows and trace for one member-month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    /// Classified rows ordered by `(date, start)`.
    pub rows: Vec<DutyRow>,
    /// What was skipped or flagged.
    pub trace: AggregationTrace,
}

/// Aggregates duty evidence into rows for one member-month at a time.
///
/// The aggregator only borrows the holiday snapshot and settings, so many
/// aggregations can run side by side over the same data.
///
/// # Example
///
/// ```
/// use duty_hours_engine::calculation::{DutyAggregator, HolidayCalendar};
/// use duty_hours_engine::config::EngineSettings;
/// use duty_hours_engine::models::{CalendarEvent, ManualDutyEntry, YearMonth};
///
/// let calendar = HolidayCalendar::default();
/// let settings = EngineSettings::default();
/// let aggregator = DutyAggregator::new(&calendar, &settings);
///
/// let events = vec![CalendarEvent::all_day("On call", "2025-06-03")];
/// let entries = vec![ManualDutyEntry::new("Dr. A", "202506031400", 1.5, "consult")];
///
/// let result = aggregator.aggregate("Dr. A", YearMonth::parse("202506").unwrap(), &events, &entries);
/// let starts: Vec<String> = result.rows.iter().map(|r| format!("{}{}", r.date.format("%d"), r.start)).collect();
/// assert_eq!(starts, vec!["031400", "031600", "040000"]);
/// ```
#[derive(Debug, Clone)]
pub struct DutyAggregator<'a> {
    calendar: &'a HolidayCalendar,
    settings: &'a EngineSettings,
    classifier: HourClassifier,
}

impl<'a> DutyAggregator<'a> {
    /// Creates an aggregator over a holiday snapshot and settings.
    pub fn new(calendar: &'a HolidayCalendar, settings: &'a EngineSettings) -> Self {
        Self {
            calendar,
            settings,
            classifier: HourClassifier::new(settings.classification.clone()),
        }
    }

    /// Produces the ordered duty rows for one member-month.
    ///
    /// `events` are the member's calendar events (already scoped to the
    /// member by the caller). `entries` may contain anyone's manual entries;
    /// only those for `member_name` starting in `period` are used.
    pub fn aggregate(
        &self,
        member_name: &str,
        period: YearMonth,
        events: &[CalendarEvent],
        entries: &[ManualDutyEntry],
    ) -> Aggregation {
        let mut trace = AggregationTrace {
            events_seen: events.len(),
            ..AggregationTrace::default()
        };
        let mut by_date: BTreeMap<NaiveDate, Vec<Shift>> = BTreeMap::new();

        self.collect_calendar(period, events, &mut by_date, &mut trace);
        self.collect_manual(member_name, period, entries, &mut by_date, &mut trace);

        let mut rows = Vec::new();
        for (date, shifts) in by_date {
            if !period.contains(date) {
                debug!(
                    member = %member_name,
                    date = %date,
                    dropped = shifts.len(),
                    "Dropping shifts outside target month"
                );
                trace.spillover_dropped += shifts.len();
                continue;
            }
            rows.extend(shifts.into_iter().map(|shift| self.to_row(shift)));
        }
        // BTreeMap already orders dates; the stable sort orders starts within a date
        rows.sort_by_key(DutyRow::sort_key);

        Aggregation { rows, trace }
    }

    fn collect_calendar(
        &self,
        period: YearMonth,
        events: &[CalendarEvent],
        by_date: &mut BTreeMap<NaiveDate, Vec<Shift>>,
        trace: &mut AggregationTrace,
    ) {
        let mut normalizer =
            ShiftNormalizer::new(self.calendar, &self.settings.calendar_duty, period);

        for event in events {
            match normalizer.normalize(event) {
                Ok(NormalizeOutcome::Generated(shifts)) => {
                    if event.spans_multiple_days() {
                        let date = shifts.first().map(|s| s.date);
                        warn!(
                            event = %event.label(),
                            "Multi-day calendar event; only its start date is used"
                        );
                        let warning = AggregationWarning::new(
                            WarningCode::MultiDayEvent,
                            format!(
                                "event '{}' spans several days; only its start date was used",
                                event.label()
                            ),
                        );
                        trace.warn(match date {
                            Some(date) => warning.on(date),
                            None => warning,
                        });
                    }
                    for shift in shifts {
                        by_date.entry(shift.date).or_default().push(shift);
                    }
                }
                Ok(NormalizeOutcome::Duplicate(date)) => {
                    trace.duplicates_dropped += 1;
                    trace.warn(
                        AggregationWarning::new(
                            WarningCode::DuplicateCalendarTrigger,
                            format!("event '{}' repeats an earlier duty trigger", event.label()),
                        )
                        .on(date),
                    );
                }
                Ok(NormalizeOutcome::OutsideMonth(_)) => {}
                Err(err) => {
                    warn!(event = %event.label(), error = %err, "Skipping invalid calendar event");
                    trace.warn(AggregationWarning::new(WarningCode::InvalidEvent, err.to_string()));
                }
            }
        }
    }

    fn collect_manual(
        &self,
        member_name: &str,
        period: YearMonth,
        entries: &[ManualDutyEntry],
        by_date: &mut BTreeMap<NaiveDate, Vec<Shift>>,
        trace: &mut AggregationTrace,
    ) {
        for entry in entries.iter().filter(|e| e.belongs_to(member_name, period)) {
            trace.entries_seen += 1;

            let split = match parse_manual_entry(entry) {
                Ok(split) => split,
                Err(err) => {
                    warn!(
                        member = %member_name,
                        entry = %entry.label(),
                        error = %err,
                        "Skipping invalid manual entry"
                    );
                    trace.warn(AggregationWarning::new(
                        WarningCode::InvalidManualEntry,
                        err.to_string(),
                    ));
                    continue;
                }
            };

            if split.is_empty() {
                warn!(
                    member = %member_name,
                    entry = %entry.label(),
                    "Manual entry has no duration"
                );
                trace.warn(
                    AggregationWarning::new(
                        WarningCode::EmptyManualEntry,
                        format!("entry '{}' has zero hours", entry.label()),
                    )
                    .on(split.date),
                );
                continue;
            }

            if split.overflow_days > 0 {
                warn!(
                    member = %member_name,
                    entry = %entry.label(),
                    skipped_days = split.overflow_days,
                    "Manual entry runs past the following day; middle days are not reported"
                );
                trace.warn(
                    AggregationWarning::new(
                        WarningCode::MultiDayOverflow,
                        format!(
                            "entry '{}' skips {} whole day(s) between its first and last shift",
                            entry.label(),
                            split.overflow_days
                        ),
                    )
                    .on(split.date),
                );
            }

            for shift in split.shifts {
                by_date.entry(shift.date).or_default().push(shift);
            }
        }
    }

    fn to_row(&self, shift: Shift) -> DutyRow {
        let hours = self
            .classifier
            .classify_shift(&shift, self.calendar.treats_as_holiday(shift.date));
        DutyRow {
            date: shift.date,
            weekday: weekday_label(shift.date).to_string(),
            start: shift.start,
            end: shift.end,
            hours,
            reason: shift.reason,
            origin: shift.origin,
        }
    }

    /// Aggregates and wraps the result into a report for a roster member.
    pub fn build_report(
        &self,
        member: &Member,
        period: YearMonth,
        events: &[CalendarEvent],
        entries: &[ManualDutyEntry],
    ) -> MemberMonthReport {
        let report_id = Uuid::new_v4();
        info!(
            report_id = %report_id,
            member = %member.name,
            period = %period,
            events = events.len(),
            "Aggregating member-month"
        );

        let started = Instant::now();
        let Aggregation { rows, trace } = self.aggregate(&member.name, period, events, entries);
        let totals = HourTotals::from_rows(&rows);

        info!(
            report_id = %report_id,
            member = %member.name,
            rows = rows.len(),
            total_hours = %totals.total_hours,
            warnings = trace.warnings.len(),
            duration_us = started.elapsed().as_micros() as u64,
            "Member-month aggregated"
        );

        MemberMonthReport {
            report_id,
            generated_at: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            member_name: member.name.clone(),
            member_id: Some(member.id.clone()),
            employee_id: member.employee_id.clone(),
            period,
            rows,
            totals,
            trace,
        }
    }
}

//! Member-month report models.
//!
//! This module contains the [`MemberMonthReport`] type and its associated
//! structures that capture everything produced for one person and one month:
//! the ordered duty rows, their totals, and a trace of what the aggregation
//! skipped or flagged along the way.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DutyRow, HourBucket, ShiftOrigin, YearMonth};

/// The kind of issue recorded in an [`AggregationWarning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    /// A second calendar event on an already-triggered start date was dropped.
    DuplicateCalendarTrigger,
    /// A calendar event had no usable start date.
    InvalidEvent,
    /// A manual entry failed validation and was skipped.
    InvalidManualEntry,
    /// A manual entry had zero hours and produced no shift.
    EmptyManualEntry,
    /// A manual entry ran past the following day; the tail was clamped.
    MultiDayOverflow,
    /// A calendar event spans several days but only its start date was used.
    MultiDayEvent,
}

/// A non-fatal issue noticed while aggregating one member-month.
///
/// # Example
///
/// ```
/// use duty_hours_engine::models::{AggregationWarning, WarningCode};
///
/// let warning = AggregationWarning::new(WarningCode::InvalidManualEntry, "hours 'abc'");
/// assert_eq!(warning.date, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationWarning {
    /// What kind of issue this is.
    pub code: WarningCode,
    /// Human-readable detail.
    pub message: String,
    /// The date the issue relates to, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl AggregationWarning {
    /// Creates a warning not tied to a date.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            date: None,
        }
    }

    /// Attaches the related date.
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// Counters and warnings collected during aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationTrace {
    /// Issues in the order they were found.
    pub warnings: Vec<AggregationWarning>,
    /// Calendar events offered for this member-month.
    pub events_seen: usize,
    /// Manual entries that matched this member-month.
    pub entries_seen: usize,
    /// Calendar events dropped as duplicate triggers.
    pub duplicates_dropped: usize,
    /// Shifts dropped because they fell outside the month.
    pub spillover_dropped: usize,
}

impl AggregationTrace {
    /// Records a warning.
    pub fn warn(&mut self, warning: AggregationWarning) {
        self.warnings.push(warning);
    }

    /// Number of warnings with the given code.
    pub fn count(&self, code: WarningCode) -> usize {
        self.warnings.iter().filter(|w| w.code == code).count()
    }
}

/// Summary figures for a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourTotals {
    /// Column-wise sum of every row's hours.
    pub by_category: HourBucket,
    /// Sum of all categories.
    pub total_hours: Decimal,
    /// Rows produced from calendar events.
    pub calendar_rows: usize,
    /// Rows produced from manual entries.
    pub manual_rows: usize,
}

impl HourTotals {
    /// Computes totals over a set of rows.
    ///
    /// # Example
    ///
    /// ```
    /// use duty_hours_engine::models::HourTotals;
    /// use rust_decimal::Decimal;
    ///
    /// let totals = HourTotals::from_rows(&[]);
    /// assert_eq!(totals.total_hours, Decimal::ZERO);
    /// assert_eq!(totals.calendar_rows + totals.manual_rows, 0);
    /// ```
    pub fn from_rows(rows: &[DutyRow]) -> Self {
        let by_category: HourBucket = rows.iter().map(|row| row.hours).sum();
        let manual_rows = rows
            .iter()
            .filter(|row| row.origin == ShiftOrigin::Manual)
            .count();

        Self {
            by_category,
            total_hours: by_category.total(),
            calendar_rows: rows.len() - manual_rows,
            manual_rows,
        }
    }
}

/// The complete duty report for one member and one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberMonthReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Version of the engine that produced the report.
    pub engine_version: String,
    /// Name of the member.
    pub member_name: String,
    /// Roster id, when the report was produced from the roster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    /// Payroll employee number, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// The month covered.
    pub period: YearMonth,
    /// Duty rows ordered by `(date, start)`.
    pub rows: Vec<DutyRow>,
    /// Summary figures over `rows`.
    pub totals: HourTotals,
    /// What the aggregation skipped or flagged.
    pub trace: AggregationTrace,
}

impl MemberMonthReport {
    /// Returns true when the member has no duty this month.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

//! Core data models for the Duty Hours Engine.
//!
//! This module contains all the domain models used throughout the engine:
//! raw inputs (calendar events, manual entries, the roster), the intermediate
//! single-day [`Shift`], and the finalized [`DutyRow`] and
//! [`MemberMonthReport`] outputs.

mod calendar_event;
mod clock_time;
pub mod compact_date;
mod duty_row;
mod holiday;
mod hour_bucket;
mod manual_entry;
mod member;
mod report;
mod shift;
mod year_month;

pub use calendar_event::{CalendarEvent, EventTime};
pub use clock_time::{ClockTime, MINUTES_PER_DAY};
pub use duty_row::DutyRow;
pub use holiday::{DayStatus, HolidayRecord};
pub use hour_bucket::{HourBucket, HourCategory};
pub use manual_entry::{DEFAULT_REASON, HoursInput, ManualDutyEntry};
pub use member::{Member, MembersFile};
pub use report::{
    AggregationTrace, AggregationWarning, HourTotals, MemberMonthReport, WarningCode,
};
pub use shift::{Shift, ShiftOrigin};
pub use year_month::{EVENT_WINDOW_SPILL_HOURS, YearMonth};

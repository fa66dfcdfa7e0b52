//! Calculation logic for the Duty Hours Engine.
//!
//! This module contains the holiday lookup, the normalization of calendar
//! duty events into shift pairs, manual entry parsing, midnight splitting,
//! hour classification, and the per member-month aggregation that ties them
//! together.

mod aggregator;
mod day_split;
mod holiday_calendar;
mod hour_classifier;
mod manual_duty;
mod shift_normalizer;

pub use aggregator::{Aggregation, DutyAggregator, ENGINE_VERSION};
pub use day_split::{DaySplit, at_clock, split_at_midnight};
pub use holiday_calendar::{HolidayCalendar, UNKNOWN_WEEKDAY, WEEKDAY_LABELS, weekday_label};
pub use hour_classifier::{HourClassifier, duration_hours, round_to_half};
pub use manual_duty::{ManualSplit, parse_manual_entry, parse_start_stamp};
pub use shift_normalizer::{NormalizeOutcome, ShiftNormalizer};

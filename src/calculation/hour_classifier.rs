//! Hour classification.
//!
//! Splits a shift's duration across the five [`HourCategory`] columns.
//!
//! ## Allocation
//!
//! **Ordinary days** fill three successive tiers:
//! - First 2 hours
//! - Hours 2 to 4
//! - Everything after 4 hours
//!
//! **Holidays and special days** fill two:
//! - First 8 hours
//! - Everything after 8 hours
//!
//! Durations are rounded to the nearest half hour (halves round up) before
//! allocation, and every column is a multiple of 0.5.
//!
//! [`HourCategory`]: crate::models::HourCategory

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use crate::config::ClassificationRules;
use crate::models::{ClockTime, HourBucket, MINUTES_PER_DAY, Shift};

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Rounds hours to the nearest half hour, halves rounding up.
///
/// # Example
///
/// ```
/// use duty_hours_engine::calculation::round_to_half;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s| Decimal::from_str(s).unwrap();
/// assert_eq!(round_to_half(dec("1.2")), dec("1.0"));
/// assert_eq!(round_to_half(dec("1.25")), dec("1.5"));
/// assert_eq!(round_to_half(dec("1.75")), dec("2.0"));
/// assert_eq!(round_to_half(dec("2.5")), dec("2.5"));
/// ```
pub fn round_to_half(hours: Decimal) -> Decimal {
    let doubled = (hours * Decimal::TWO)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    (doubled / Decimal::TWO).normalize()
}

/// Duration between two clock times in half-hour-rounded hours.
///
/// An end before the start is read as running past midnight and gets 24
/// hours added.
pub fn duration_hours(start: ClockTime, end: ClockTime) -> Decimal {
    let mut minutes = i64::from(end.minutes()) - i64::from(start.minutes());
    if minutes < 0 {
        warn!(start = %start, end = %end, "Shift end before start; assuming it runs past midnight");
        minutes += i64::from(MINUTES_PER_DAY);
    }
    round_to_half(Decimal::from(minutes) / MINUTES_PER_HOUR)
}

/// Allocates shift durations to hour categories.
///
/// # Example
///
/// ```
/// use duty_hours_engine::calculation::HourClassifier;
/// use duty_hours_engine::models::ClockTime;
/// use rust_decimal::Decimal;
///
/// let classifier = HourClassifier::default();
/// let start = ClockTime::parse_start("1600").unwrap();
/// let end = ClockTime::END_OF_DAY;
///
/// let ordinary = classifier.classify(start, end, false);
/// assert_eq!(ordinary.as_array(), [2, 2, 4, 0, 0].map(Decimal::from));
///
/// let holiday = classifier.classify(ClockTime::MIDNIGHT, end, true);
/// assert_eq!(holiday.as_array(), [0, 0, 0, 8, 16].map(Decimal::from));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HourClassifier {
    rules: ClassificationRules,
}

impl HourClassifier {
    /// Creates a classifier with the given tier thresholds.
    pub fn new(rules: ClassificationRules) -> Self {
        Self { rules }
    }

    /// The tier thresholds in use.
    pub fn rules(&self) -> &ClassificationRules {
        &self.rules
    }

    /// Classifies the interval `[start, end)`.
    pub fn classify(&self, start: ClockTime, end: ClockTime, is_holiday: bool) -> HourBucket {
        self.allocate(duration_hours(start, end), is_holiday)
    }

    /// Classifies a shift.
    pub fn classify_shift(&self, shift: &Shift, is_holiday: bool) -> HourBucket {
        self.classify(shift.start, shift.end, is_holiday)
    }

    /// Classifies raw `HHMM` strings.
    ///
    /// Unparsable input yields an all-zero bucket and a log line instead of
    /// an error.
    pub fn classify_hhmm(&self, start: &str, end: &str, is_holiday: bool) -> HourBucket {
        match (ClockTime::parse_end(start), ClockTime::parse_end(end)) {
            (Ok(start), Ok(end)) => self.classify(start, end, is_holiday),
            (start_result, end_result) => {
                warn!(
                    start = %start,
                    end = %end,
                    start_ok = start_result.is_ok(),
                    end_ok = end_result.is_ok(),
                    "Unparsable shift times; classifying as zero hours"
                );
                HourBucket::ZERO
            }
        }
    }

    /// Allocates a duration in hours to categories.
    pub fn allocate(&self, hours: Decimal, is_holiday: bool) -> HourBucket {
        if hours <= Decimal::ZERO {
            if hours < Decimal::ZERO {
                warn!(hours = %hours, "Negative duration; classifying as zero hours");
            }
            return HourBucket::ZERO;
        }

        let rules = &self.rules;
        let columns = if is_holiday {
            let base = hours.min(rules.holiday_base_hours);
            let beyond = (hours - rules.holiday_base_hours).max(Decimal::ZERO);
            [Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, base, beyond]
        } else {
            let first = hours.min(rules.first_tier_hours);
            let second = (hours - rules.first_tier_hours)
                .max(Decimal::ZERO)
                .min(rules.second_tier_hours);
            let beyond =
                (hours - rules.first_tier_hours - rules.second_tier_hours).max(Decimal::ZERO);
            [first, second, beyond, Decimal::ZERO, Decimal::ZERO]
        };

        HourBucket::from_hours(columns.map(round_to_half))
    }
}

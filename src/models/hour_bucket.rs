//! Categorized hours for a single shift.
//!
//! Every duty row reports its duration split across five fixed categories.
//! The first three are successive tiers of an ordinary-day shift; the last two
//! apply only on holidays and special days.

use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One of the five hour categories of an [`HourBucket`].
///
/// # Example
///
/// ```
/// use duty_hours_engine::models::HourCategory;
///
/// assert_eq!(HourCategory::ALL.len(), 5);
/// assert!(HourCategory::HolidayFirstEight.is_holiday());
/// assert!(!HourCategory::FirstTwoHours.is_holiday());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourCategory {
    /// Ordinary day, first two hours.
    FirstTwoHours,
    /// Ordinary day, hours two to four.
    NextTwoHours,
    /// Ordinary day, everything past four hours.
    BeyondFourHours,
    /// Holiday or special day, up to eight hours.
    HolidayFirstEight,
    /// Holiday or special day, everything past eight hours.
    HolidayBeyondEight,
}

impl HourCategory {
    /// All categories in report column order.
    pub const ALL: [HourCategory; 5] = [
        HourCategory::FirstTwoHours,
        HourCategory::NextTwoHours,
        HourCategory::BeyondFourHours,
        HourCategory::HolidayFirstEight,
        HourCategory::HolidayBeyondEight,
    ];

    /// Column index of this category within a bucket.
    pub fn index(self) -> usize {
        match self {
            HourCategory::FirstTwoHours => 0,
            HourCategory::NextTwoHours => 1,
            HourCategory::BeyondFourHours => 2,
            HourCategory::HolidayFirstEight => 3,
            HourCategory::HolidayBeyondEight => 4,
        }
    }

    /// Returns true for the two holiday columns.
    pub fn is_holiday(self) -> bool {
        matches!(
            self,
            HourCategory::HolidayFirstEight | HourCategory::HolidayBeyondEight
        )
    }
}

/// An ordered 5-tuple of half-hour quantized hours.
///
/// Serialized as a plain five-element array in [`HourCategory::ALL`] order.
///
/// # Example
///
/// ```
/// use duty_hours_engine::models::{HourBucket, HourCategory};
/// use rust_decimal::Decimal;
///
/// let bucket = HourBucket::from_hours([
///     Decimal::new(2, 0),
///     Decimal::new(2, 0),
///     Decimal::new(4, 0),
///     Decimal::ZERO,
///     Decimal::ZERO,
/// ]);
/// assert_eq!(bucket.get(HourCategory::BeyondFourHours), Decimal::new(4, 0));
/// assert_eq!(bucket.total(), Decimal::new(8, 0));
/// assert!(!bucket.has_holiday_hours());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourBucket {
    hours: [Decimal; 5],
}

impl HourBucket {
    /// A bucket with every category at zero.
    pub const ZERO: HourBucket = HourBucket {
        hours: [Decimal::ZERO; 5],
    };

    /// Wraps raw column values.
    pub fn from_hours(hours: [Decimal; 5]) -> Self {
        Self { hours }
    }

    /// Returns the hours in one category.
    pub fn get(&self, category: HourCategory) -> Decimal {
        self.hours[category.index()]
    }

    /// Returns all five columns in report order.
    pub fn as_array(&self) -> [Decimal; 5] {
        self.hours
    }

    /// Sum over all categories.
    pub fn total(&self) -> Decimal {
        self.hours.iter().copied().sum()
    }

    /// Returns true when every category is zero.
    pub fn is_zero(&self) -> bool {
        self.hours.iter().all(|h| h.is_zero())
    }

    /// Returns true when any ordinary-day column is non-zero.
    pub fn has_ordinary_hours(&self) -> bool {
        HourCategory::ALL
            .iter()
            .filter(|c| !c.is_holiday())
            .any(|c| !self.get(*c).is_zero())
    }

    /// Returns true when any holiday column is non-zero.
    pub fn has_holiday_hours(&self) -> bool {
        HourCategory::ALL
            .iter()
            .filter(|c| c.is_holiday())
            .any(|c| !self.get(*c).is_zero())
    }
}

impl Add for HourBucket {
    type Output = HourBucket;

    fn add(self, rhs: HourBucket) -> HourBucket {
        let mut hours = self.hours;
        for (slot, extra) in hours.iter_mut().zip(rhs.hours) {
            *slot += extra;
        }
        HourBucket { hours }
    }
}

impl std::iter::Sum for HourBucket {
    fn sum<I: Iterator<Item = HourBucket>>(iter: I) -> Self {
        iter.fold(HourBucket::ZERO, Add::add)
    }
}

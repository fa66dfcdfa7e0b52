//! Manual overtime entry model.
//!
//! Manual entries are typed in by staff: a person, a start stamp in
//! `YYYYMMDDHHMM` form, a duration in hours and a reason. They are kept in
//! their raw form here; validation happens when they are parsed into shifts so
//! that one bad entry is skipped instead of rejecting the whole list.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::YearMonth;
use crate::error::{EngineError, EngineResult};

/// Reason recorded when an entry carries none.
pub const DEFAULT_REASON: &str = "N/A";

fn default_reason() -> String {
    DEFAULT_REASON.to_string()
}

/// Hours as they were entered: a JSON number or free text.
///
/// Any other JSON value, and a missing field, land in [`HoursInput::Other`]
/// so that the entry still deserializes and is rejected on its own later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HoursInput {
    /// A numeric value.
    Number(f64),
    /// A textual value that may or may not be numeric.
    Text(String),
    /// Null, a boolean, an array or an object.
    Other(Value),
}

impl Default for HoursInput {
    fn default() -> Self {
        HoursInput::Other(Value::Null)
    }
}

impl HoursInput {
    /// Interprets the input as a non-negative number of hours.
    ///
    /// # Example
    ///
    /// ```
    /// use duty_hours_engine::models::HoursInput;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(HoursInput::Number(1.5).to_decimal().unwrap(), Decimal::new(15, 1));
    /// assert_eq!(HoursInput::Text(" 3 ".to_string()).to_decimal().unwrap(), Decimal::new(3, 0));
    /// assert!(HoursInput::Text("abc".to_string()).to_decimal().is_err());
    /// assert!(HoursInput::Number(-1.0).to_decimal().is_err());
    /// assert!(HoursInput::default().to_decimal().is_err());
    /// ```
    pub fn to_decimal(&self) -> EngineResult<Decimal> {
        let invalid = || EngineError::InvalidDuration {
            value: self.to_string(),
        };

        let hours = match self {
            HoursInput::Number(value) => Decimal::try_from(*value).map_err(|_| invalid())?,
            HoursInput::Text(text) => Decimal::from_str(text.trim()).map_err(|_| invalid())?,
            HoursInput::Other(_) => return Err(invalid()),
        };

        if hours.is_sign_negative() && !hours.is_zero() {
            return Err(invalid());
        }
        Ok(hours)
    }
}

impl std::fmt::Display for HoursInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HoursInput::Number(value) => write!(f, "{}", value),
            HoursInput::Text(text) => write!(f, "{}", text),
            HoursInput::Other(value) => write!(f, "{}", value),
        }
    }
}

/// A manually entered overtime record.
///
/// Every field is optional on the wire. An entry without a stamp or person
/// never matches a member-month; one without usable hours is reported as
/// invalid when parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualDutyEntry {
    /// Record identifier assigned by the store, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Start stamp, `YYYYMMDDHHMM`.
    #[serde(default)]
    pub date_time: String,
    /// Duration in hours.
    #[serde(default)]
    pub hours: HoursInput,
    /// Name of the person who worked the overtime.
    #[serde(default)]
    pub person: String,
    /// Free-text reason.
    #[serde(default = "default_reason")]
    pub reason: String,
}

impl ManualDutyEntry {
    /// Creates an entry with numeric hours.
    pub fn new(
        person: impl Into<String>,
        date_time: impl Into<String>,
        hours: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            date_time: date_time.into(),
            hours: HoursInput::Number(hours),
            person: person.into(),
            reason: reason.into(),
        }
    }

    /// A short human-readable handle for logs and errors.
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.date_time)
    }

    /// Returns true when the entry is for `member_name` and starts inside
    /// `period`.
    ///
    /// Membership is decided on the raw stamp prefix, before any validation,
    /// so malformed entries of other members never show up in this member's
    /// warnings.
    pub fn belongs_to(&self, member_name: &str, period: YearMonth) -> bool {
        self.person == member_name && self.date_time.starts_with(&period.to_string())
    }
}

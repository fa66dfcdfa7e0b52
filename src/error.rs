//! Error types for the Duty Hours Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while turning calendar events and
//! manual overtime entries into duty rows.

use thiserror::Error;

/// The main error type for the Duty Hours Engine.
///
/// Two families of errors live here. Configuration errors (a missing or
/// unparsable holiday table, settings file or roster) abort the whole run.
/// Everything else describes a single bad input entry; the aggregator absorbs
/// those, logs them and keeps going with the remaining entries.
///
/// # Example
///
/// ```
/// use duty_hours_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/holidays.json".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/holidays.json");
/// assert!(error.is_configuration_error());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A date string was not a valid `YYYYMMDD` (or ISO) calendar date.
    #[error("Invalid date: {value}")]
    InvalidDate {
        /// The offending input.
        value: String,
    },

    /// A time string was not a valid `HHMM` clock time.
    #[error("Invalid time: {value}")]
    InvalidTime {
        /// The offending input.
        value: String,
    },

    /// A duration was not a non-negative number of hours.
    #[error("Invalid duration: {value}")]
    InvalidDuration {
        /// The offending input.
        value: String,
    },

    /// A report period was not a valid `YYYYMM` string.
    #[error("Invalid year-month '{value}', expected YYYYMM")]
    InvalidYearMonth {
        /// The offending input.
        value: String,
    },

    /// A calendar event could not be turned into shifts.
    #[error("Invalid calendar event '{event_id}': {message}")]
    InvalidEvent {
        /// The event id, or its summary when no id is present.
        event_id: String,
        /// A description of what made the event invalid.
        message: String,
    },

    /// A manual overtime entry could not be turned into shifts.
    #[error("Invalid manual entry '{entry_id}': {message}")]
    InvalidEntry {
        /// The entry id, or its raw date-time when no id is present.
        entry_id: String,
        /// A description of what made the entry invalid.
        message: String,
    },

    /// A requested member is not part of the roster.
    #[error("Member not found: {id}")]
    MemberNotFound {
        /// The member id that was requested.
        id: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Returns true for errors that invalidate the whole run rather than a
    /// single input entry.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

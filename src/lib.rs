//! Duty Hours Engine
//!
//! This crate turns on-call calendar events and manually entered overtime
//! records into monthly duty rows, splitting shifts at midnight and
//! classifying their hours by holiday status.
//!
//! # Example
//!
//! ```
//! use duty_hours_engine::calculation::{DutyAggregator, HolidayCalendar};
//! use duty_hours_engine::config::EngineSettings;
//! use duty_hours_engine::models::{CalendarEvent, YearMonth};
//!
//! let calendar = HolidayCalendar::default();
//! let settings = EngineSettings::default();
//! let events = vec![CalendarEvent::all_day("On call", "2025-06-03")];
//!
//! let result = DutyAggregator::new(&calendar, &settings)
//!     .aggregate("Dr. A", YearMonth::parse("202506").unwrap(), &events, &[]);
//! assert_eq!(result.rows.len(), 2);
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod runner;

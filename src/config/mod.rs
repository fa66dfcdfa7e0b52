//! Configuration loading and management for the Duty Hours Engine.
//!
//! This module provides functionality to load engine settings from YAML and
//! the holiday table and member roster from JSON.
//!
//! # Example
//!
//! ```no_run
//! use duty_hours_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/duty2025").unwrap();
//! println!("Duty reason code: {}", config.settings().calendar_duty.reason_code);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CalendarDutyPattern, ClassificationRules, EngineSettings, HolidaySourceEntry};

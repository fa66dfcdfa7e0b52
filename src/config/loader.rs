//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings, the holiday table and the member roster from a directory.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::calculation::HolidayCalendar;
use crate::error::{EngineError, EngineResult};
use crate::models::{DayStatus, HolidayRecord, Member, MembersFile, compact_date};

use super::types::{EngineSettings, HolidaySourceEntry};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/duty2025/
/// ├── engine.yaml    # Engine settings
/// ├── holidays.json  # Holiday table (name set by `holiday_file`)
/// └── members.json   # Roster (optional, name set by `members_file`)
/// ```
///
/// # Example
///
/// ```no_run
/// use duty_hours_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/duty2025").unwrap();
/// println!("{} dated entries in holiday table", loader.calendar().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: EngineSettings,
    calendar: HolidayCalendar,
    members: Vec<Member>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `engine.yaml` or the holiday table is missing
    /// - Either contains invalid YAML/JSON
    /// - The calendar duty pattern would not yield a linked shift pair
    /// - A roster file is configured but missing or malformed
    ///
    /// # Example
    ///
    /// ```no_run
    /// use duty_hours_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/duty2025")?;
    /// # Ok::<(), duty_hours_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings_path = path.join("engine.yaml");
        let settings = Self::load_yaml::<EngineSettings>(&settings_path)?;
        settings
            .calendar_duty
            .validate()
            .map_err(|message| EngineError::ConfigParseError {
                path: settings_path.display().to_string(),
                message,
            })?;
        let calendar = Self::load_holidays(path.join(&settings.holiday_file))?;

        let members = match &settings.members_file {
            Some(file) => Self::load_members(path.join(file))?,
            None => Vec::new(),
        };

        info!(
            config_dir = %path.display(),
            holiday_dates = calendar.len(),
            members = members.len(),
            "Configuration loaded"
        );

        Ok(Self {
            settings,
            calendar,
            members,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let content = Self::read(path)?;
        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Loads and parses a JSON file.
    fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let content = Self::read(path)?;
        serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn read(path: &Path) -> EngineResult<String> {
        fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path.display().to_string(),
        })
    }

    /// Loads a holiday table.
    ///
    /// Rows with a malformed date are skipped; rows with an unknown status
    /// are kept as workdays. Both are logged. A missing or unparsable file is
    /// a hard error.
    pub fn load_holidays<P: AsRef<Path>>(path: P) -> EngineResult<HolidayCalendar> {
        let path = path.as_ref();
        let rows = Self::load_json::<Vec<HolidaySourceEntry>>(path)?;
        let total = rows.len();

        let records: Vec<HolidayRecord> = rows
            .into_iter()
            .filter_map(|row| {
                let date = match compact_date::parse(row.date.trim()) {
                    Ok(date) => date,
                    Err(_) => {
                        warn!(date = %row.date, "Skipping holiday row with malformed date");
                        return None;
                    }
                };
                let status = row
                    .status_code()
                    .and_then(DayStatus::from_code)
                    .unwrap_or_else(|| {
                        warn!(date = %row.date, status = %row.status, "Unknown holiday status; treating as workday");
                        DayStatus::Workday
                    });
                Some(HolidayRecord::new(date, status).with_note(row.note.unwrap_or_default()))
            })
            .collect();

        if records.len() < total {
            warn!(
                path = %path.display(),
                skipped = total - records.len(),
                "Some holiday rows were skipped"
            );
        }

        Ok(HolidayCalendar::from_records(records))
    }

    /// Loads a roster file.
    pub fn load_members<P: AsRef<Path>>(path: P) -> EngineResult<Vec<Member>> {
        Ok(Self::load_json::<MembersFile>(path.as_ref())?.calendars)
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the holiday snapshot.
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// Returns the roster. Empty when no roster file is configured.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Gets a roster member by id, ignoring case.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use duty_hours_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/duty2025")?;
    /// let member = loader.member("a")?;
    /// println!("Member: {}", member.name);
    /// # Ok::<(), duty_hours_engine::error::EngineError>(())
    /// ```
    pub fn member(&self, id: &str) -> EngineResult<&Member> {
        self.members
            .iter()
            .find(|m| m.matches_id(id))
            .ok_or_else(|| EngineError::MemberNotFound { id: id.to_string() })
    }

    /// Splits the loader into its parts.
    pub fn into_parts(self) -> (EngineSettings, HolidayCalendar, Vec<Member>) {
        (self.settings, self.calendar, self.members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/duty2025"
    }

    fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A scratch directory under the system temp dir, unique per test.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "duty-hours-engine-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.calendar().len(), 365);
        assert_eq!(loader.settings().calendar_duty.reason_code, "10");
        assert_eq!(loader.members().len(), 3);
    }

    #[test]
    fn test_fixture_holidays() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let calendar = loader.calendar();

        assert!(calendar.treats_as_holiday(make_date(2025, 6, 7))); // Saturday
        assert!(calendar.treats_as_holiday(make_date(2025, 5, 30))); // festival
        assert!(calendar.is_special("20250612"));
        assert!(!calendar.treats_as_holiday(make_date(2025, 6, 3)));
    }

    #[test]
    fn test_member_lookup_ignores_case() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.member("a").unwrap().name, "Dr. A");

        match loader.member("Z") {
            Err(EngineError::MemberNotFound { id }) => assert_eq!(id, "Z"),
            other => panic!("Expected MemberNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_directory_is_config_not_found() {
        let result = ConfigLoader::load("./config/does-not-exist");
        match result {
            Err(e @ EngineError::ConfigNotFound { .. }) => assert!(e.is_configuration_error()),
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_holiday_file_is_hard_failure() {
        let dir = scratch_dir("missing-holidays");
        fs::write(dir.join("engine.yaml"), "holiday_file: nowhere.json\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigNotFound { path }) => assert!(path.ends_with("nowhere.json")),
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_holiday_file_is_parse_error() {
        let dir = scratch_dir("bad-holidays");
        fs::write(dir.join("engine.yaml"), "holiday_file: holidays.json\n").unwrap();
        fs::write(dir.join("holidays.json"), "{ not json").unwrap();

        assert!(matches!(
            ConfigLoader::load(&dir),
            Err(EngineError::ConfigParseError { .. })
        ));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_broken_duty_pattern_is_parse_error() {
        let dir = scratch_dir("broken-pattern");
        fs::write(
            dir.join("engine.yaml"),
            "holiday_file: holidays.json\ncalendar_duty:\n  next_day_end: \"0000\"\n",
        )
        .unwrap();
        fs::write(dir.join("holidays.json"), "[]").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.ends_with("engine.yaml"));
                assert!(message.contains("next_day_end"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other.map(|_| ())),
        }
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_bad_rows_are_skipped_or_defaulted() {
        let dir = scratch_dir("messy-holidays");
        let path = dir.join("holidays.json");
        fs::write(
            &path,
            r#"[
                {"西元日期": "20250607", "是否放假": "2", "備註": ""},
                {"西元日期": "2025-06-08", "是否放假": "2", "備註": ""},
                {"西元日期": "20250609", "是否放假": "9", "備註": "odd"},
                {"西元日期": "20250612", "是否放假": 3, "備註": "drill"}
            ]"#,
        )
        .unwrap();

        let calendar = ConfigLoader::load_holidays(&path).unwrap();
        assert_eq!(calendar.len(), 3);
        assert!(calendar.is_holiday("20250607"));
        assert!(!calendar.is_holiday("20250608"));
        assert_eq!(calendar.day_status(make_date(2025, 6, 9)), DayStatus::Workday);
        assert_eq!(calendar.record(make_date(2025, 6, 12)).note, "drill");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_roster_is_optional() {
        let dir = scratch_dir("no-roster");
        fs::write(dir.join("engine.yaml"), "holiday_file: holidays.json\n").unwrap();
        fs::write(dir.join("holidays.json"), "[]").unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert!(loader.members().is_empty());
        assert!(loader.calendar().is_empty());
        let _ = fs::remove_dir_all(&dir);
    }
}

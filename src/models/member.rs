//! Roster member model.

use serde::{Deserialize, Serialize};

/// A person whose duty is reported.
///
/// Calendar events are fetched per `calendar_id`; manual entries are matched
/// on `name`.
///
/// # Example
///
/// ```
/// use duty_hours_engine::models::Member;
///
/// let member: Member = serde_json::from_str(
///     r#"{"id": "A", "name": "Dr. A", "calendar_id": "a@group.calendar"}"#,
/// ).unwrap();
/// assert!(member.has_calendar());
/// assert_eq!(member.employee_id, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Roster identifier, compared upper-cased.
    pub id: String,
    /// Display name, also the `person` field of manual entries.
    pub name: String,
    /// Calendar the member's duty events live in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<String>,
    /// Payroll employee number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

impl Member {
    /// Creates a member with no calendar or employee number.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            calendar_id: None,
            employee_id: None,
        }
    }

    /// Sets the calendar id.
    pub fn with_calendar(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = Some(calendar_id.into());
        self
    }

    /// Sets the employee number.
    pub fn with_employee_id(mut self, employee_id: impl Into<String>) -> Self {
        self.employee_id = Some(employee_id.into());
        self
    }

    /// Returns true when the member has a non-empty calendar id.
    pub fn has_calendar(&self) -> bool {
        self.calendar_id.as_deref().is_some_and(|id| !id.trim().is_empty())
    }

    /// Case-insensitive id match.
    pub fn matches_id(&self, id: &str) -> bool {
        self.id.to_uppercase() == id.to_uppercase()
    }
}

/// On-disk shape of the roster file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MembersFile {
    /// Every roster entry.
    #[serde(default)]
    pub calendars: Vec<Member>,
}

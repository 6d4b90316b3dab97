use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::date::{value_of, CalendarDate};
use super::id::{generate_id, IdKind};
use super::lenient;
use super::note::Note;
use super::status::DisplayStatus;

/// A milestone belonging to a project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Subtask {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub completion_criteria: String,
    #[serde(deserialize_with = "lenient::text")]
    pub success_metric: String,
    /// Free-text description of what this milestone waits on.
    #[serde(deserialize_with = "lenient::text")]
    pub dependencies: String,
    #[serde(deserialize_with = "lenient::text")]
    pub owner: String,
    pub start_date: Option<CalendarDate>,
    pub due_date: Option<CalendarDate>,
    #[serde(deserialize_with = "lenient::flag")]
    pub completed: bool,
    #[serde(deserialize_with = "lenient::records")]
    pub notes: Vec<Note>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Subtask {
    /// Create a subtask with a fresh `task_` id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(IdKind::Subtask),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_dates(mut self, start: NaiveDate, due: NaiveDate) -> Self {
        self.start_date = Some(start.into());
        self.due_date = Some(due.into());
        self
    }

    pub fn start(&self) -> Option<NaiveDate> {
        value_of(&self.start_date)
    }

    pub fn due(&self) -> Option<NaiveDate> {
        value_of(&self.due_date)
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due().is_some_and(|due| due < today)
    }

    /// Completed, else Overdue past the due date, else In Progress once started.
    pub fn display_status(&self, today: NaiveDate) -> DisplayStatus {
        if self.completed {
            DisplayStatus::Completed
        } else if self.is_overdue(today) {
            DisplayStatus::Overdue
        } else if self.start().is_some_and(|start| start <= today) {
            DisplayStatus::InProgress
        } else {
            DisplayStatus::NotStarted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[test]
    fn test_subtask_display_status() {
        let today = date(2, 10);
        let mut s = Subtask::new("Vendor RFQ").with_dates(date(1, 6), date(1, 31));
        assert_eq!(s.display_status(today), DisplayStatus::Overdue);

        s.completed = true;
        assert_eq!(s.display_status(today), DisplayStatus::Completed);

        let upcoming = Subtask::new("Film trial").with_dates(date(3, 1), date(3, 20));
        assert_eq!(upcoming.display_status(today), DisplayStatus::NotStarted);

        let running = Subtask::new("Pricing review").with_dates(date(2, 1), date(2, 28));
        assert_eq!(running.display_status(today), DisplayStatus::InProgress);
    }

    #[test]
    fn test_missing_fields_default() {
        let s: Subtask = serde_json::from_str(r#"{"id": "s1"}"#).unwrap();
        assert_eq!(s.id, "s1");
        assert!(!s.completed);
        assert!(s.due().is_none());
        assert!(!s.is_overdue(date(12, 31)));
    }
}

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::date::{value_of, CalendarDate, Timestamp};
use super::id::{generate_id, IdKind};
use super::lenient;
use super::note::Note;
use super::status::{DisplayStatus, Priority, Status, Stored};
use super::subtask::Subtask;

/// A tracked quarterly objective with its milestones and notes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    /// Display ordering only; not required to be unique.
    #[serde(deserialize_with = "lenient::optional_number")]
    pub objective_number: Option<u32>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub category: String,
    #[serde(deserialize_with = "lenient::text")]
    pub owner: String,
    #[serde(deserialize_with = "lenient::string_set")]
    pub team_members: BTreeSet<String>,
    pub priority: Stored<Priority>,
    pub status: Stored<Status>,
    pub start_date: Option<CalendarDate>,
    pub due_date: Option<CalendarDate>,
    #[serde(deserialize_with = "lenient::whole_number")]
    pub estimated_hours: u64,
    #[serde(deserialize_with = "lenient::whole_number")]
    pub actual_hours: u64,
    #[serde(deserialize_with = "lenient::whole_number")]
    pub budget: u64,
    #[serde(deserialize_with = "lenient::whole_number")]
    pub budget_spent: u64,
    /// Cached from subtask completion whenever the project has subtasks.
    #[serde(deserialize_with = "lenient::percentage")]
    pub completion_percentage: u8,
    #[serde(deserialize_with = "lenient::whole_number")]
    pub potential_savings: u64,
    #[serde(deserialize_with = "lenient::string_list")]
    pub tags: Vec<String>,
    /// Ids of subtasks (in any project) this objective waits on.
    #[serde(deserialize_with = "lenient::string_list")]
    pub dependencies: Vec<String>,
    #[serde(deserialize_with = "lenient::records")]
    pub subtasks: Vec<Subtask>,
    #[serde(deserialize_with = "lenient::records")]
    pub notes: Vec<Note>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    /// Create a project with a fresh `proj_` id and default fields.
    pub fn new(objective_number: u32, name: impl Into<String>) -> Self {
        Self {
            id: generate_id(IdKind::Project),
            objective_number: Some(objective_number),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn start(&self) -> Option<NaiveDate> {
        value_of(&self.start_date)
    }

    /// Stored status; an unrecognised label reads as the default.
    pub fn status(&self) -> Status {
        self.status.get()
    }

    pub fn priority(&self) -> Priority {
        self.priority.get()
    }

    pub fn due(&self) -> Option<NaiveDate> {
        value_of(&self.due_date)
    }

    /// `Obj 3: Film Vendor Consolidation`, the label used on charts and tabs.
    pub fn short_label(&self, max_name: usize) -> String {
        let number = self
            .objective_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".to_string());
        format!("Obj {}: {}", number, truncate(&self.name, max_name))
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status() != Status::Completed && self.due().is_some_and(|due| due < today)
    }

    /// The stored status, or `Overdue` when not completed and past due.
    pub fn display_status(&self, today: NaiveDate) -> DisplayStatus {
        if self.is_overdue(today) {
            DisplayStatus::Overdue
        } else {
            self.status().into()
        }
    }

    pub fn completed_subtasks(&self) -> usize {
        self.subtasks.iter().filter(|s| s.completed).count()
    }

    /// Completed fraction of subtasks, or `None` without subtasks.
    pub fn subtask_ratio(&self) -> Option<f32> {
        if self.subtasks.is_empty() {
            None
        } else {
            Some(self.completed_subtasks() as f32 / self.subtasks.len() as f32)
        }
    }

    /// Whether `completion_percentage` is derived from subtasks.
    pub fn completion_is_derived(&self) -> bool {
        !self.subtasks.is_empty()
    }

    /// Re-derive `completion_percentage` from subtask completion.
    /// Projects without subtasks keep their manually set value.
    pub fn recompute_completion(&mut self) {
        let total = self.subtasks.len();
        if total > 0 {
            let done = self.completed_subtasks();
            self.completion_percentage = ((100 * done) as f64 / total as f64).round() as u8;
        }
    }

    pub fn subtask(&self, id: &str) -> Option<&Subtask> {
        self.subtasks.iter().find(|s| s.id == id)
    }

    pub fn subtask_mut(&mut self, id: &str) -> Option<&mut Subtask> {
        self.subtasks.iter_mut().find(|s| s.id == id)
    }

    /// Mark a subtask done or open. Returns false if no subtask has `id`.
    pub fn set_subtask_completed(&mut self, id: &str, completed: bool) -> bool {
        let Some(subtask) = self.subtask_mut(id) else {
            return false;
        };
        subtask.completed = completed;
        self.recompute_completion();
        true
    }

    pub fn add_subtask(&mut self, subtask: Subtask) {
        self.subtasks.push(subtask);
        self.recompute_completion();
    }

    /// Replace the subtask with the same id. Returns false if absent.
    pub fn replace_subtask(&mut self, updated: Subtask) -> bool {
        let Some(slot) = self.subtask_mut(&updated.id) else {
            return false;
        };
        *slot = updated;
        self.recompute_completion();
        true
    }

    pub fn remove_subtask(&mut self, id: &str) -> Option<Subtask> {
        let idx = self.subtasks.iter().position(|s| s.id == id)?;
        let removed = self.subtasks.remove(idx);
        self.recompute_completion();
        Some(removed)
    }

    /// Move the subtask at `from` to position `to` (clamped to the list).
    pub fn move_subtask(&mut self, from: usize, to: usize) -> bool {
        if from >= self.subtasks.len() {
            return false;
        }
        let to = to.min(self.subtasks.len() - 1);
        let subtask = self.subtasks.remove(from);
        self.subtasks.insert(to, subtask);
        true
    }

    /// Append a note; blank text is ignored.
    pub fn add_note(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.notes.push(Note::new(text));
        true
    }

    pub fn remove_note(&mut self, index: usize) -> Option<Note> {
        (index < self.notes.len()).then(|| self.notes.remove(index))
    }

    /// Notes ordered newest first by timestamp; untimed notes sort last.
    pub fn notes_newest_first(&self) -> Vec<(usize, &Note)> {
        let mut notes: Vec<(usize, &Note)> = self.notes.iter().enumerate().collect();
        notes.sort_by(|a, b| value_of(&b.1.timestamp).cmp(&value_of(&a.1.timestamp)));
        notes
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{}…", cut.trim_end())
    }
}

/// A field-level patch for a project. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectUpdate {
    pub objective_number: Option<u32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub owner: Option<String>,
    pub team_members: Option<BTreeSet<String>>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub estimated_hours: Option<u64>,
    pub actual_hours: Option<u64>,
    pub budget: Option<u64>,
    pub budget_spent: Option<u64>,
    pub completion_percentage: Option<u8>,
    pub potential_savings: Option<u64>,
    pub tags: Option<Vec<String>>,
    pub dependencies: Option<Vec<String>>,
}

impl ProjectUpdate {
    /// Patch every editable field from `edited`.
    pub fn from_edited(edited: &Project) -> Self {
        Self {
            objective_number: edited.objective_number,
            name: Some(edited.name.clone()),
            description: Some(edited.description.clone()),
            category: Some(edited.category.clone()),
            owner: Some(edited.owner.clone()),
            team_members: Some(edited.team_members.clone()),
            priority: Some(edited.priority()),
            status: Some(edited.status()),
            start_date: edited.start(),
            due_date: edited.due(),
            estimated_hours: Some(edited.estimated_hours),
            actual_hours: Some(edited.actual_hours),
            budget: Some(edited.budget),
            budget_spent: Some(edited.budget_spent),
            completion_percentage: Some(edited.completion_percentage),
            potential_savings: Some(edited.potential_savings),
            tags: Some(edited.tags.clone()),
            dependencies: Some(edited.dependencies.clone()),
        }
    }

    /// Merge into `project`. A completion value is ignored while the
    /// percentage is derived from subtasks.
    pub fn apply_to(self, project: &mut Project) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        if self.objective_number.is_some() {
            project.objective_number = self.objective_number;
        }
        set(&mut project.name, self.name);
        set(&mut project.description, self.description);
        set(&mut project.category, self.category);
        set(&mut project.owner, self.owner);
        set(&mut project.team_members, self.team_members);
        if let Some(priority) = self.priority {
            project.priority.set(priority);
        }
        if let Some(status) = self.status {
            project.status.set(status);
        }
        if let Some(start) = self.start_date {
            project.start_date = Some(start.into());
        }
        if let Some(due) = self.due_date {
            project.due_date = Some(due.into());
        }
        set(&mut project.estimated_hours, self.estimated_hours);
        set(&mut project.actual_hours, self.actual_hours);
        set(&mut project.budget, self.budget);
        set(&mut project.budget_spent, self.budget_spent);
        set(
            &mut project.completion_percentage,
            self.completion_percentage.map(|p| p.min(100)),
        );
        set(&mut project.potential_savings, self.potential_savings);
        set(&mut project.tags, self.tags);
        set(&mut project.dependencies, self.dependencies);
        project.recompute_completion();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn project_with_subtasks(done: &[bool]) -> Project {
        let mut p = Project::new(1, "Flexpack pricing");
        for (i, completed) in done.iter().enumerate() {
            let mut s = Subtask::new(format!("Milestone {}", i + 1));
            s.completed = *completed;
            p.subtasks.push(s);
        }
        p
    }

    #[test]
    fn test_overdue_is_derived_from_due_date() {
        let today = date(3, 1);
        let mut p = Project::new(2, "Resin contract");
        p.status = Status::InProgress.into();
        p.due_date = Some(date(2, 15).into());
        assert_eq!(p.display_status(today), DisplayStatus::Overdue);
        assert_eq!(p.status(), Status::InProgress);

        p.status = Status::Completed.into();
        assert_eq!(p.display_status(today), DisplayStatus::Completed);

        p.status = Status::OnHold.into();
        p.due_date = Some(date(3, 31).into());
        assert_eq!(p.display_status(today), DisplayStatus::OnHold);
    }

    #[test]
    fn test_completion_rounds_subtask_ratio() {
        let mut p = project_with_subtasks(&[true, true, false]);
        p.recompute_completion();
        assert_eq!(p.completion_percentage, 67);

        let last = p.subtasks[2].id.clone();
        assert!(p.set_subtask_completed(&last, true));
        assert_eq!(p.completion_percentage, 100);
        assert!(!p.set_subtask_completed("missing", true));
    }

    #[test]
    fn test_manual_completion_survives_without_subtasks() {
        let mut p = Project::new(3, "Warehouse layout");
        ProjectUpdate {
            completion_percentage: Some(40),
            ..Default::default()
        }
        .apply_to(&mut p);
        assert_eq!(p.completion_percentage, 40);

        let mut derived = project_with_subtasks(&[false, false]);
        ProjectUpdate {
            completion_percentage: Some(90),
            ..Default::default()
        }
        .apply_to(&mut derived);
        assert_eq!(derived.completion_percentage, 0);
    }

    #[test]
    fn test_move_subtask_keeps_others_in_order() {
        let mut p = project_with_subtasks(&[false, false, false]);
        let names = |p: &Project| p.subtasks.iter().map(|s| s.name.clone()).collect::<Vec<_>>();
        assert!(p.move_subtask(0, 2));
        assert_eq!(names(&p), vec!["Milestone 2", "Milestone 3", "Milestone 1"]);
        assert!(p.move_subtask(2, 99));
        assert_eq!(names(&p), vec!["Milestone 2", "Milestone 3", "Milestone 1"]);
        assert!(!p.move_subtask(5, 0));
    }

    #[test]
    fn test_remove_subtask_updates_completion() {
        let mut p = project_with_subtasks(&[true, false]);
        p.recompute_completion();
        assert_eq!(p.completion_percentage, 50);
        let open_id = p.subtasks[1].id.clone();
        assert!(p.remove_subtask(&open_id).is_some());
        assert_eq!(p.completion_percentage, 100);
    }

    #[test]
    fn test_blank_note_is_ignored() {
        let mut p = Project::new(4, "Carrier bids");
        assert!(!p.add_note("   "));
        assert!(p.add_note("  Sent RFQ to three carriers "));
        assert_eq!(p.notes[0].text, "Sent RFQ to three carriers");
        assert!(p.notes[0].id.as_deref().is_some_and(|id| id.starts_with("note_")));
        assert!(p.remove_note(5).is_none());
    }

    #[test]
    fn test_unknown_keys_survive_a_round_trip() {
        let raw = json!({
            "id": "p1",
            "objective_number": 1,
            "owner_email": "ops@example.com",
            "subtasks": [{"id": "s1", "completed": false, "weight": 2}]
        });
        let p: Project = serde_json::from_value(raw).unwrap();
        assert_eq!(p.extra.get("owner_email"), Some(&json!("ops@example.com")));
        let back = serde_json::to_value(&p).unwrap();
        assert_eq!(back["owner_email"], json!("ops@example.com"));
        assert_eq!(back["subtasks"][0]["weight"], json!(2));
    }

    #[test]
    fn test_short_label_truncates_long_names() {
        let p = Project::new(7, "Consolidate corrugated and flexible film vendors");
        assert_eq!(p.short_label(12), "Obj 7: Consolidate…");
        let mut unnumbered = Project::default();
        unnumbered.name = "Misc".into();
        assert_eq!(unnumbered.short_label(30), "Obj ?: Misc");
    }
}

use chrono::NaiveDate;

use super::filter::{owner_label, ProjectFilter};
use crate::model::{DisplayStatus, Project};

/// One bar on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct GanttRow {
    pub project_id: String,
    /// Set for subtask rows.
    pub subtask_id: Option<String>,
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub status: DisplayStatus,
    pub completion: u8,
    pub owner: String,
}

impl GanttRow {
    pub fn is_subtask(&self) -> bool {
        self.subtask_id.is_some()
    }

    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Rows for the projects `filter` admits. Projects (and subtasks) missing
/// either date are skipped; an end before the start is clamped to the start.
pub fn gantt_rows(
    projects: &[Project],
    filter: &ProjectFilter,
    show_subtasks: bool,
    today: NaiveDate,
) -> Vec<GanttRow> {
    let mut rows = Vec::new();
    for project in filter.apply(projects, today) {
        let (Some(start), Some(end)) = (project.start(), project.due()) else {
            continue;
        };
        let owner = owner_label(project).to_string();
        rows.push(GanttRow {
            project_id: project.id.clone(),
            subtask_id: None,
            label: project.short_label(30),
            start,
            end: end.max(start),
            status: project.display_status(today),
            completion: project.completion_percentage,
            owner: owner.clone(),
        });

        if !show_subtasks {
            continue;
        }
        for subtask in &project.subtasks {
            let (Some(start), Some(end)) = (subtask.start(), subtask.due()) else {
                continue;
            };
            rows.push(GanttRow {
                project_id: project.id.clone(),
                subtask_id: Some(subtask.id.clone()),
                label: format!("  └ {}", subtask.name),
                start,
                end: end.max(start),
                status: subtask.display_status(today),
                completion: if subtask.completed { 100 } else { 0 },
                owner: if subtask.owner.trim().is_empty() {
                    owner.clone()
                } else {
                    subtask.owner.clone()
                },
            });
        }
    }
    rows
}

/// Earliest start and latest end across `rows`.
pub fn date_span(rows: &[GanttRow]) -> Option<(NaiveDate, NaiveDate)> {
    let start = rows.iter().map(|r| r.start).min()?;
    let end = rows.iter().map(|r| r.end).max()?;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Subtask};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn dated(number: u32, start: NaiveDate, due: NaiveDate) -> Project {
        let mut p = Project::new(number, format!("Objective {}", number));
        p.start_date = Some(start.into());
        p.due_date = Some(due.into());
        p
    }

    #[test]
    fn test_rows_skip_undated_and_nest_subtasks() {
        let today = date(2, 1);
        let mut first = dated(1, date(1, 5), date(3, 20));
        first.add_subtask(Subtask::new("RFQ").with_dates(date(1, 5), date(1, 20)));
        first.add_subtask(Subtask::new("No dates"));
        let undated = Project::new(2, "Someday");
        let mut third = dated(3, date(2, 1), date(1, 1));
        third.priority = Priority::High.into();

        let projects = vec![third, undated, first];
        let rows = gantt_rows(&projects, &ProjectFilter::default(), true, today);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Obj 1: Objective 1", "  └ RFQ", "Obj 3: Objective 3"]);
        assert!(rows[1].is_subtask());
        assert_eq!(rows[1].status, DisplayStatus::Overdue);
        assert_eq!(rows[1].owner, "Unassigned");
        assert_eq!(rows[2].end, rows[2].start);
        assert_eq!(rows[2].duration_days(), 1);

        let collapsed = gantt_rows(&projects, &ProjectFilter::default(), false, today);
        assert_eq!(collapsed.len(), 2);
        assert_eq!(date_span(&collapsed), Some((date(1, 5), date(3, 20))));

        let high = ProjectFilter {
            priority: Some(Priority::High),
            ..Default::default()
        };
        assert_eq!(gantt_rows(&projects, &high, true, today).len(), 1);
    }
}

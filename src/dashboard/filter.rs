use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::model::{DisplayStatus, Priority, Project};

/// Sidebar filter; `None` on a field means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub owner: Option<String>,
    pub status: Option<DisplayStatus>,
    pub priority: Option<Priority>,
}

impl ProjectFilter {
    pub fn is_empty(&self) -> bool {
        self.owner.is_none() && self.status.is_none() && self.priority.is_none()
    }

    /// Status is compared against the display status, so `Overdue` works.
    pub fn matches(&self, project: &Project, today: NaiveDate) -> bool {
        self.owner.as_ref().map_or(true, |o| owner_label(project) == o.as_str())
            && self.priority.map_or(true, |p| project.priority() == p)
            && self
                .status
                .map_or(true, |s| project.display_status(today) == s)
    }

    /// Matching projects ordered by objective number (unnumbered last).
    pub fn apply<'a>(&self, projects: &'a [Project], today: NaiveDate) -> Vec<&'a Project> {
        let mut matched: Vec<&Project> = projects
            .iter()
            .filter(|p| self.matches(p, today))
            .collect();
        matched.sort_by_key(|p| p.objective_number.unwrap_or(u32::MAX));
        matched
    }
}

/// Owner as displayed; blank owners read as "Unassigned".
pub fn owner_label(project: &Project) -> &str {
    if project.owner.trim().is_empty() {
        "Unassigned"
    } else {
        project.owner.as_str()
    }
}

/// Distinct owners, sorted, for the owner filter.
pub fn owners(projects: &[Project]) -> Vec<String> {
    projects
        .iter()
        .map(|p| owner_label(p).to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn project(number: Option<u32>, owner: &str, status: Status, due: NaiveDate) -> Project {
        let mut p = Project::new(0, format!("{:?}", number));
        p.objective_number = number;
        p.owner = owner.to_string();
        p.status = status.into();
        p.due_date = Some(due.into());
        p
    }

    #[test]
    fn test_filters_on_display_status_and_sorts() {
        let today = date(2, 1);
        let projects = vec![
            project(Some(3), "Ops", Status::InProgress, date(1, 15)),
            project(None, "Ops", Status::InProgress, date(1, 20)),
            project(Some(1), "Ops", Status::InProgress, date(1, 10)),
            project(Some(2), "Finance", Status::InProgress, date(3, 1)),
        ];

        let overdue = ProjectFilter {
            status: Some(DisplayStatus::Overdue),
            ..Default::default()
        };
        let numbers: Vec<Option<u32>> = overdue
            .apply(&projects, today)
            .iter()
            .map(|p| p.objective_number)
            .collect();
        assert_eq!(numbers, vec![Some(1), Some(3), None]);

        let finance = ProjectFilter {
            owner: Some("Finance".into()),
            status: Some(DisplayStatus::InProgress),
            priority: Some(Priority::Medium),
        };
        assert_eq!(finance.apply(&projects, today).len(), 1);
        assert!(ProjectFilter::default().is_empty());
    }

    #[test]
    fn test_owners_are_distinct_and_sorted() {
        let today = date(1, 1);
        let projects = vec![
            project(Some(1), "Ops", Status::NotStarted, today),
            project(Some(2), "", Status::NotStarted, today),
            project(Some(3), "Finance", Status::NotStarted, today),
            project(Some(4), "Ops", Status::NotStarted, today),
        ];
        assert_eq!(owners(&projects), vec!["Finance", "Ops", "Unassigned"]);
    }
}

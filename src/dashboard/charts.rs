//! Data series behind the dashboard charts.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use super::filter::owner_label;
use crate::config::Quarter;
use crate::model::{DisplayStatus, Labelled, Priority, Project};

/// One bar of the completion chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionBar {
    pub label: String,
    pub completion: u8,
    pub status: DisplayStatus,
    pub owner: String,
}

/// Completion per project, lowest first.
pub fn completion_bars(projects: &[Project], today: NaiveDate) -> Vec<CompletionBar> {
    let mut bars: Vec<CompletionBar> = projects
        .iter()
        .map(|p| CompletionBar {
            label: p.short_label(30),
            completion: p.completion_percentage,
            status: p.display_status(today),
            owner: owner_label(p).to_string(),
        })
        .collect();
    bars.sort_by_key(|b| b.completion);
    bars
}

/// Project count per display status, in first-seen order.
pub fn status_distribution(projects: &[Project], today: NaiveDate) -> Vec<(DisplayStatus, usize)> {
    let mut counts: Vec<(DisplayStatus, usize)> = Vec::new();
    for project in projects {
        let status = project.display_status(today);
        match counts.iter_mut().find(|(s, _)| *s == status) {
            Some((_, n)) => *n += 1,
            None => counts.push((status, 1)),
        }
    }
    counts
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerLoad {
    pub owner: String,
    pub projects: usize,
    pub estimated_hours: u64,
    pub subtasks: usize,
}

/// Workload per owner, sorted by owner name.
pub fn owner_workload(projects: &[Project]) -> Vec<OwnerLoad> {
    let mut by_owner: BTreeMap<&str, OwnerLoad> = BTreeMap::new();
    for project in projects {
        let owner = owner_label(project);
        let load = by_owner.entry(owner).or_insert_with(|| OwnerLoad {
            owner: owner.to_string(),
            ..Default::default()
        });
        load.projects += 1;
        load.estimated_hours = load.estimated_hours.saturating_add(project.estimated_hours);
        load.subtasks += project.subtasks.len();
    }
    by_owner.into_values().collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetBar {
    pub label: String,
    pub name: String,
    pub budget: u64,
    pub spent: u64,
}

impl BudgetBar {
    pub fn over_budget(&self) -> bool {
        self.spent > self.budget
    }
}

/// Budget against spend, one entry per objective in list order.
pub fn budget_bars(projects: &[Project]) -> Vec<BudgetBar> {
    projects
        .iter()
        .map(|p| BudgetBar {
            label: p
                .objective_number
                .map_or_else(|| "Obj ?".to_string(), |n| format!("Obj {}", n)),
            name: p.name.clone(),
            budget: p.budget,
            spent: p.budget_spent,
        })
        .collect()
}

/// Project count per priority, High to Low, omitting empty priorities.
pub fn priority_counts(projects: &[Project]) -> Vec<(Priority, usize)> {
    Priority::ALL
        .iter()
        .map(|&priority| {
            (
                priority,
                projects.iter().filter(|p| p.priority() == priority).count(),
            )
        })
        .filter(|(_, n)| *n > 0)
        .collect()
}

/// Subtask deadlines per month of the quarter, labelled by month name.
/// Deadlines outside the quarter are not counted.
pub fn milestones_by_month(projects: &[Project], quarter: &Quarter) -> Vec<(String, usize)> {
    let months = quarter.months();
    let mut counts = vec![0usize; months.len()];
    for due in projects
        .iter()
        .flat_map(|p| p.subtasks.iter())
        .filter_map(|s| s.due())
    {
        if let Some(idx) = months
            .iter()
            .position(|m| m.year() == due.year() && m.month() == due.month())
        {
            counts[idx] += 1;
        }
    }
    months
        .iter()
        .map(|m| m.format("%B").to_string())
        .zip(counts)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Status, Subtask};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn portfolio() -> Vec<Project> {
        let mut a = Project::new(1, "Flexpack");
        a.owner = "Ops".into();
        a.priority = Priority::High.into();
        a.estimated_hours = 120;
        a.completion_percentage = 80;
        a.budget = 1_000;
        a.budget_spent = 1_200;
        a.add_subtask(Subtask::new("quotes").with_dates(date(1, 5), date(1, 30)));
        a.add_subtask(Subtask::new("award").with_dates(date(2, 1), date(2, 20)));
        a.completion_percentage = 80;

        let mut b = Project::new(2, "Resin");
        b.owner = "Finance".into();
        b.priority = Priority::High.into();
        b.status = Status::InProgress.into();
        b.due_date = Some(date(1, 10).into());
        b.estimated_hours = 40;
        b.add_subtask(Subtask::new("audit").with_dates(date(3, 1), date(3, 15)));
        b.add_subtask(Subtask::new("late").with_dates(date(3, 1), date(4, 15)));

        let mut c = Project::new(3, "Carriers");
        c.owner = "Ops".into();
        c.priority = Priority::Low.into();
        c.estimated_hours = 10;
        vec![a, b, c]
    }

    #[test]
    fn test_completion_bars_sorted_ascending() {
        let bars = completion_bars(&portfolio(), date(2, 1));
        let values: Vec<u8> = bars.iter().map(|b| b.completion).collect();
        assert_eq!(values, vec![0, 0, 80]);
        assert_eq!(bars[2].label, "Obj 1: Flexpack");
    }

    #[test]
    fn test_status_distribution_uses_display_status() {
        let dist = status_distribution(&portfolio(), date(2, 1));
        assert_eq!(
            dist,
            vec![(DisplayStatus::NotStarted, 2), (DisplayStatus::Overdue, 1)]
        );
    }

    #[test]
    fn test_owner_workload() {
        let load = owner_workload(&portfolio());
        assert_eq!(load.len(), 2);
        assert_eq!(load[0].owner, "Finance");
        assert_eq!(load[1].owner, "Ops");
        assert_eq!(load[1].projects, 2);
        assert_eq!(load[1].estimated_hours, 130);
        assert_eq!(load[1].subtasks, 2);
    }

    #[test]
    fn test_budget_and_priority() {
        let projects = portfolio();
        let bars = budget_bars(&projects);
        assert!(bars[0].over_budget());
        assert_eq!(bars[1].label, "Obj 2");
        assert_eq!(
            priority_counts(&projects),
            vec![(Priority::High, 2), (Priority::Low, 1)]
        );
    }

    #[test]
    fn test_milestones_by_month_skips_out_of_quarter() {
        let months = milestones_by_month(&portfolio(), &Quarter::default());
        assert_eq!(
            months,
            vec![
                ("January".to_string(), 1),
                ("February".to_string(), 1),
                ("March".to_string(), 1)
            ]
        );
    }
}

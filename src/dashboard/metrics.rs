use chrono::NaiveDate;

use crate::config::Quarter;
use crate::model::{Project, Status};

/// Headline numbers for the dashboard and sidebar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    pub total_projects: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub overdue: usize,
    /// Mean of `completion_percentage` across projects.
    pub average_completion: f32,
    pub subtasks_total: usize,
    pub subtasks_done: usize,
    pub budget: u64,
    pub budget_spent: u64,
    pub potential_savings: u64,
    pub days_left_in_quarter: Option<i64>,
}

impl Metrics {
    pub fn compute(projects: &[Project], quarter: &Quarter, today: NaiveDate) -> Self {
        let total_projects = projects.len();
        let average_completion = if total_projects == 0 {
            0.0
        } else {
            projects
                .iter()
                .map(|p| p.completion_percentage as f32)
                .sum::<f32>()
                / total_projects as f32
        };

        Self {
            total_projects,
            completed: count_status(projects, Status::Completed),
            in_progress: count_status(projects, Status::InProgress),
            overdue: projects.iter().filter(|p| p.is_overdue(today)).count(),
            average_completion,
            subtasks_total: projects.iter().map(|p| p.subtasks.len()).sum(),
            subtasks_done: projects.iter().map(Project::completed_subtasks).sum(),
            budget: saturating_total(projects, |p| p.budget),
            budget_spent: saturating_total(projects, |p| p.budget_spent),
            potential_savings: saturating_total(projects, |p| p.potential_savings),
            days_left_in_quarter: quarter.days_left(today),
        }
    }

    /// Whole-portfolio subtask completion, 0..=100 (truncated).
    pub fn overall_subtask_percentage(&self) -> u8 {
        if self.subtasks_total == 0 {
            0
        } else {
            (self.subtasks_done * 100 / self.subtasks_total) as u8
        }
    }

    /// Share of projects whose stored status is Completed, 0.0..=1.0.
    pub fn completed_fraction(&self) -> f32 {
        if self.total_projects == 0 {
            0.0
        } else {
            self.completed as f32 / self.total_projects as f32
        }
    }
}

/// Money and hour totals pin at `u64::MAX` instead of overflowing.
fn saturating_total(projects: &[Project], field: impl Fn(&Project) -> u64) -> u64 {
    projects.iter().map(field).fold(0, u64::saturating_add)
}

fn count_status(projects: &[Project], status: Status) -> usize {
    projects.iter().filter(|p| p.status() == status).count()
}

/// Colour band for a progress bar at `percentage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBand {
    Good,
    Warning,
    Critical,
    Idle,
}

impl ProgressBand {
    pub fn for_percentage(percentage: u8) -> Self {
        match percentage {
            75.. => ProgressBand::Good,
            50..=74 => ProgressBand::Warning,
            1..=49 => ProgressBand::Critical,
            0 => ProgressBand::Idle,
        }
    }
}

/// `$12,500`
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

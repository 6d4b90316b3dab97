use chrono::NaiveDate;

use crate::model::Project;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Overdue,
    DueSoon,
    OnTrack,
}

impl Urgency {
    /// Days within which an open deadline counts as due soon.
    pub const SOON_DAYS: i64 = 7;

    pub fn for_days_left(days_left: i64) -> Self {
        if days_left < 0 {
            Urgency::Overdue
        } else if days_left <= Self::SOON_DAYS {
            Urgency::DueSoon
        } else {
            Urgency::OnTrack
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Urgency::Overdue => "Overdue",
            Urgency::DueSoon => "Due Soon",
            Urgency::OnTrack => "On Track",
        }
    }
}

/// An open subtask with a due date, as listed on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Deadline {
    pub project_id: String,
    pub subtask_id: String,
    pub project_label: String,
    pub milestone: String,
    pub owner: String,
    pub due: NaiveDate,
    pub days_left: i64,
    pub urgency: Urgency,
}

/// Open subtasks with due dates, soonest first, at most `limit` of them.
///
/// The subtask owner is shown when set, otherwise the project owner.
pub fn upcoming_deadlines(projects: &[Project], today: NaiveDate, limit: usize) -> Vec<Deadline> {
    let mut deadlines: Vec<Deadline> = projects
        .iter()
        .flat_map(|project| {
            project
                .subtasks
                .iter()
                .filter(|s| !s.completed)
                .filter_map(move |subtask| {
                    let due = subtask.due()?;
                    let days_left = (due - today).num_days();
                    let owner = if subtask.owner.trim().is_empty() {
                        project.owner.clone()
                    } else {
                        subtask.owner.clone()
                    };
                    Some(Deadline {
                        project_id: project.id.clone(),
                        subtask_id: subtask.id.clone(),
                        project_label: project.short_label(25),
                        milestone: subtask.name.clone(),
                        owner,
                        due,
                        days_left,
                        urgency: Urgency::for_days_left(days_left),
                    })
                })
        })
        .collect();
    deadlines.sort_by_key(|d| d.due);
    deadlines.truncate(limit);
    deadlines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Subtask;
    use pretty_assertions::assert_eq;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[test]
    fn test_urgency_thresholds() {
        assert_eq!(Urgency::for_days_left(-1), Urgency::Overdue);
        assert_eq!(Urgency::for_days_left(0), Urgency::DueSoon);
        assert_eq!(Urgency::for_days_left(7), Urgency::DueSoon);
        assert_eq!(Urgency::for_days_left(8), Urgency::OnTrack);
    }

    #[test]
    fn test_open_deadlines_sorted_and_limited() {
        let today = date(2, 10);
        let mut p = Project::new(1, "Resin contract");
        p.owner = "Supply Chain Manager".into();

        let mut done = Subtask::new("Signed").with_dates(date(1, 1), date(1, 5));
        done.completed = true;
        p.add_subtask(done);
        p.add_subtask(Subtask::new("Negotiate").with_dates(date(2, 1), date(2, 14)));
        let mut legal = Subtask::new("Legal review").with_dates(date(1, 10), date(2, 3));
        legal.owner = "Legal".into();
        p.add_subtask(legal);
        p.add_subtask(Subtask::new("Undated"));
        p.add_subtask(Subtask::new("Rollout").with_dates(date(3, 1), date(3, 30)));

        let all = upcoming_deadlines(&[p.clone()], today, 10);
        let names: Vec<&str> = all.iter().map(|d| d.milestone.as_str()).collect();
        assert_eq!(names, vec!["Legal review", "Negotiate", "Rollout"]);
        assert_eq!(all[0].owner, "Legal");
        assert_eq!(all[0].urgency, Urgency::Overdue);
        assert_eq!(all[1].owner, "Supply Chain Manager");
        assert_eq!(all[1].days_left, 4);
        assert_eq!(all[1].urgency, Urgency::DueSoon);
        assert_eq!(all[2].urgency, Urgency::OnTrack);

        assert_eq!(upcoming_deadlines(&[p], today, 2).len(), 2);
    }
}

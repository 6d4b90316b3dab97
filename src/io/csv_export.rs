use std::path::Path;

use chrono::NaiveDate;

use crate::error::Result;
use crate::model::Project;

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Export the schedule: one row per project followed by one per subtask.
///
/// Columns: Objective, Kind, Name, Owner, Start, Due, Status, Completion.
/// Status is the display status as of `today`. Returns the number of data rows.
pub fn export_csv(projects: &[Project], path: &Path, today: NaiveDate) -> Result<usize> {
    let wtr = csv::Writer::from_path(path)?;
    let rows = write_schedule(projects, wtr, today)?;
    tracing::info!(rows, path = %path.display(), "exported schedule CSV");
    Ok(rows)
}

fn write_schedule<W: std::io::Write>(
    projects: &[Project],
    mut wtr: csv::Writer<W>,
    today: NaiveDate,
) -> Result<usize> {
    wtr.write_record([
        "Objective",
        "Kind",
        "Name",
        "Owner",
        "Start",
        "Due",
        "Status",
        "Completion",
    ])?;

    let mut rows = 0;
    for project in projects {
        let objective = project
            .objective_number
            .map(|n| n.to_string())
            .unwrap_or_default();
        let start = format_date(project.start());
        let due = format_date(project.due());
        let completion = format!("{}%", project.completion_percentage);
        wtr.write_record([
            objective.as_str(),
            "Project",
            project.name.as_str(),
            project.owner.as_str(),
            start.as_str(),
            due.as_str(),
            project.display_status(today).label(),
            completion.as_str(),
        ])?;
        rows += 1;

        for subtask in &project.subtasks {
            let owner = if subtask.owner.is_empty() {
                project.owner.as_str()
            } else {
                subtask.owner.as_str()
            };
            let start = format_date(subtask.start());
            let due = format_date(subtask.due());
            wtr.write_record([
                objective.as_str(),
                "Subtask",
                subtask.name.as_str(),
                owner,
                start.as_str(),
                due.as_str(),
                subtask.display_status(today).label(),
                if subtask.completed { "100%" } else { "0%" },
            ])?;
            rows += 1;
        }
    }

    wtr.flush()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Status, Subtask};

    #[test]
    fn test_schedule_rows() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let d = |m, day| NaiveDate::from_ymd_opt(2026, m, day).unwrap();

        let mut p = Project::new(5, "Pallet, crate & film sourcing");
        p.owner = "Purchasing".into();
        p.status = Status::InProgress.into();
        p.start_date = Some(d(1, 5).into());
        p.due_date = Some(d(3, 20).into());
        let mut done = Subtask::new("Shortlist vendors").with_dates(d(1, 5), d(1, 20));
        done.completed = true;
        p.add_subtask(done);
        let mut late = Subtask::new("Trial run").with_dates(d(1, 21), d(2, 1));
        late.owner = "QA Team".into();
        p.add_subtask(late);

        let mut buf = Vec::new();
        let rows = write_schedule(&[p], csv::Writer::from_writer(&mut buf), today).unwrap();
        assert_eq!(rows, 3);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Objective,Kind,Name,Owner,Start,Due,Status,Completion");
        assert_eq!(
            lines[1],
            "5,Project,\"Pallet, crate & film sourcing\",Purchasing,2026-01-05,2026-03-20,In Progress,50%"
        );
        assert_eq!(lines[2], "5,Subtask,Shortlist vendors,Purchasing,2026-01-05,2026-01-20,Completed,100%");
        assert_eq!(lines[3], "5,Subtask,Trial run,QA Team,2026-01-21,2026-02-01,Overdue,0%");
    }
}

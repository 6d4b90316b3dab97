use chrono::NaiveDate;
use objective_tracker::io::{self, csv_export, RecordStore};
use objective_tracker::model::{Project, Subtask};
use objective_tracker::Error;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, m, d).unwrap()
}

fn portfolio() -> Vec<Project> {
    let mut film = Project::new(1, "Film vendor consolidation");
    film.owner = "Supply Chain".into();
    film.start_date = Some(date(1, 5).into());
    film.due_date = Some(date(3, 31).into());
    film.add_subtask(Subtask::new("Quotes").with_dates(date(1, 5), date(1, 30)));
    film.add_subtask(Subtask::new("Award").with_dates(date(2, 2), date(2, 27)));

    let mut resin = Project::new(2, "Resin contract");
    resin.completion_percentage = 20;
    vec![film, resin]
}

#[test]
fn test_export_then_import_replaces_store() {
    let dir = TempDir::new().unwrap();
    let export = dir.path().join("objectives.json");
    let projects = portfolio();
    io::export_json(&projects, &export).unwrap();

    let store = RecordStore::open(dir.path().join("data"));
    assert!(store.save(&[Project::new(9, "Old objective")]));

    let imported = io::import_json(&export).unwrap();
    assert!(store.save(&imported));
    assert_eq!(store.load(), projects);
}

#[test]
fn test_import_of_non_array_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"name": "not a list"}"#).unwrap();
    assert!(matches!(io::import_json(&path), Err(Error::Json(_))));
}

#[test]
fn test_schedule_csv_lists_projects_then_milestones() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schedule.csv");
    let rows = csv_export::export_csv(&portfolio(), &path, date(2, 10)).unwrap();
    assert_eq!(rows, 4);

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "Objective");
    assert_eq!(&headers[7], "Completion");

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(&records[0][1], "Project");
    assert_eq!(&records[0][2], "Film vendor consolidation");
    assert_eq!(&records[0][5], "2026-03-31");
    assert_eq!(&records[1][2], "Quotes");
    assert_eq!(&records[3][2], "Resin contract");
    assert_eq!(&records[3][7], "20%");
}

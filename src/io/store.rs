use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::Project;

/// File name of the project document inside the data directory.
pub const PROJECTS_FILE: &str = "projects.json";

/// Durable storage of the project list as one JSON document.
///
/// `load` and `save` never fail outward: a missing or corrupt file loads as an
/// empty list and a failed write returns `false`. Both log what went wrong.
/// Use `try_load`/`try_save` to see the underlying error.
#[derive(Debug, Clone)]
pub struct RecordStore {
    data_dir: PathBuf,
    path: PathBuf,
}

impl RecordStore {
    /// Point the store at `<data_dir>/projects.json`, creating the directory
    /// if needed. Safe to call repeatedly.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        if let Err(e) = fs::create_dir_all(&data_dir) {
            tracing::warn!(dir = %data_dir.display(), error = %e, "could not create data directory");
        }
        let path = data_dir.join(PROJECTS_FILE);
        Self { data_dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Read the project list, or an empty list if it is absent or unreadable.
    pub fn load(&self) -> Vec<Project> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no project file yet");
            return Vec::new();
        }
        match self.try_load() {
            Ok(projects) => {
                tracing::info!(count = projects.len(), path = %self.path.display(), "loaded projects");
                projects
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to load projects, starting empty");
                Vec::new()
            }
        }
    }

    pub fn try_load(&self) -> Result<Vec<Project>> {
        read_projects(&self.path)
    }

    /// Overwrite the file with the full list. Returns false on any failure.
    pub fn save(&self, projects: &[Project]) -> bool {
        match self.try_save(projects) {
            Ok(()) => {
                tracing::debug!(count = projects.len(), path = %self.path.display(), "saved projects");
                true
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "failed to save projects");
                false
            }
        }
    }

    pub fn try_save(&self, projects: &[Project]) -> Result<()> {
        write_projects(&self.path, projects)
    }
}

/// The document must be an array; entries that are not records are skipped.
pub(crate) fn read_projects(path: &Path) -> Result<Vec<Project>> {
    let json = fs::read_to_string(path)?;
    let entries: Vec<serde_json::Value> = serde_json::from_str(&json)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(project) => Some(project),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed project entry");
                None
            }
        })
        .collect())
}

/// Pretty-print `projects` to `path`, replacing it in one rename.
pub(crate) fn write_projects(path: &Path, projects: &[Project]) -> Result<()> {
    let json = serde_json::to_string_pretty(projects)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Note, Priority, ProjectUpdate, Status, Subtask};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn sample() -> Vec<Project> {
        let mut p = Project::new(1, "Flexpack pricing reduction");
        p.owner = "Supply Chain".into();
        p.team_members = ["Finance", "QA Team"].iter().map(|s| s.to_string()).collect();
        p.priority = Priority::High.into();
        p.status = Status::InProgress.into();
        p.start_date = Some(date(1, 6).into());
        p.due_date = Some(date(3, 31).into());
        p.budget = 25_000;
        p.budget_spent = 4_200;
        p.tags = vec!["pricing".into(), "film".into()];
        p.add_subtask(Subtask::new("Collect vendor quotes").with_dates(date(1, 6), date(1, 31)));
        p.add_note("Kickoff held with purchasing");
        p.created_at = Some(crate::model::date::now_timestamp().into());

        let mut q = Project::new(2, "Resin contract renewal");
        q.status = Status::OnHold.into();
        q.notes.push(Note {
            text: "legacy note".into(),
            timestamp: Some(serde_json::from_str("\"yesterday\"").unwrap()),
            ..Default::default()
        });
        vec![p, q]
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path());
        let projects = sample();

        assert!(store.save(&projects));
        let loaded = store.load();
        assert_eq!(loaded, projects);
        assert_eq!(loaded[0].subtasks[0].due(), Some(date(1, 31)));
        assert_eq!(loaded[0].notes[0].timestamp, projects[0].notes[0].timestamp);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path().join("nested").join("data"));
        assert!(store.data_dir().is_dir());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_invalid_json_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path());
        fs::write(store.path(), "{ not json ]").unwrap();
        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(Error::Json(_))));
    }

    #[test]
    fn test_non_array_document_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path());
        fs::write(store.path(), r#"{"projects": []}"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_null_collections_do_not_drop_the_document() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path());
        let doc = r#"[
          {"id": "p1", "name": "Film vendors", "subtasks": [{"id": "t1", "name": "RFQ", "notes": null}]},
          {"id": "p2", "name": "Resin", "team_members": null, "subtasks": null, "notes": null},
          null,
          {"id": "p3", "name": "Pallets", "notes": [{"text": "ok", "id": 4}, "stray"]}
        ]"#;
        fs::write(store.path(), doc).unwrap();

        let projects = store.load();
        assert_eq!(
            projects.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            vec!["p1", "p2", "p3"]
        );
        assert!(projects[0].subtasks[0].notes.is_empty());
        assert!(projects[1].team_members.is_empty());
        assert!(projects[1].subtasks.is_empty());
        assert_eq!(projects[2].notes.len(), 1);
        assert_eq!(projects[2].notes[0].id.as_deref(), Some("4"));
    }

    #[test]
    fn test_large_amounts_round_trip_exactly() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path());
        fs::write(store.path(), r#"[{"id": "p1", "budget": 9007199254740993}]"#).unwrap();

        let projects = store.load();
        assert_eq!(projects[0].budget, 9_007_199_254_740_993);
        assert!(store.save(&projects));
        assert_eq!(store.load()[0].budget, 9_007_199_254_740_993);
    }

    #[test]
    fn test_unrecognised_status_is_saved_as_written() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path());
        fs::write(
            store.path(),
            r#"[{"id": "p1", "name": "Pallet pooling", "status": "Blocked", "priority": "Urgent"}]"#,
        )
        .unwrap();

        let mut projects = store.load();
        assert_eq!(projects[0].status(), Status::NotStarted);
        assert!(!projects[0].status.is_known());

        // An edit that leaves status and priority alone keeps both labels.
        let mut edited = projects[0].clone();
        edited.name = "Pallet pooling pilot".into();
        assert!(crate::io::update(&mut projects, "p1", ProjectUpdate::from_edited(&edited)));
        assert!(store.save(&projects));
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\"status\": \"Blocked\""));
        assert!(text.contains("\"priority\": \"Urgent\""));

        let mut edited = store.load().remove(0);
        edited.status = Status::Completed.into();
        assert!(crate::io::update(&mut projects, "p1", ProjectUpdate::from_edited(&edited)));
        assert!(store.save(&projects));
        assert_eq!(store.load()[0].status(), Status::Completed);
        assert!(fs::read_to_string(store.path()).unwrap().contains("\"priority\": \"Urgent\""));
    }

    #[test]
    fn test_save_failure_returns_false() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path());
        // A directory squatting on the file name makes the rename fail.
        fs::create_dir_all(store.path()).unwrap();
        assert!(!store.save(&sample()));
    }

    #[test]
    fn test_saved_file_is_pretty_printed_iso_dates() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path());
        assert!(store.save(&sample()));
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("[\n  {"));
        assert!(text.contains("\"due_date\": \"2026-03-31\""));
        assert!(text.contains("\"timestamp\": \"yesterday\""));
    }

    #[test]
    fn test_reads_legacy_document() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path());
        let legacy = r#"[
          {
            "id": "proj_20260102090000000000",
            "objective_number": 3,
            "name": "Carrier consolidation",
            "status": "In Progress",
            "priority": "Low",
            "start_date": "2026-01-06",
            "due_date": "TBD",
            "budget": 1500.0,
            "completion_percentage": 50,
            "subtasks": [
              {"id": "task_1", "name": "RFQ", "due_date": "2026-02-01T00:00:00", "completed": true},
              {"id": "task_2", "name": "Award", "completed": false}
            ],
            "notes": [{"text": "called carriers", "timestamp": "2026-01-09T14:22:31.500000"}],
            "created_at": "2026-01-02T09:00:00",
            "updated_at": "2026-01-09T14:22:31.500000"
          }
        ]"#;
        fs::write(store.path(), legacy).unwrap();

        let projects = store.load();
        assert_eq!(projects.len(), 1);
        let p = &projects[0];
        assert_eq!(p.objective_number, Some(3));
        assert_eq!(p.start(), Some(date(1, 6)));
        assert_eq!(p.due(), None);
        assert_eq!(p.budget, 1500);
        assert_eq!(p.subtasks[0].due(), Some(date(2, 1)));
        assert!(p.subtasks[0].completed);
        assert!(p.notes[0].timestamp.as_ref().and_then(|t| t.value()).is_some());

        // Saving keeps the unparseable due date as written.
        assert!(store.save(&projects));
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\"due_date\": \"TBD\""));
    }
}

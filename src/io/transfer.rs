use std::path::Path;

use chrono::NaiveDate;

use super::store::{read_projects, write_projects};
use crate::error::Result;
use crate::model::Project;

/// Write the whole list to `path` in the store's own format.
pub fn export_json(projects: &[Project], path: &Path) -> Result<()> {
    write_projects(path, projects)?;
    tracing::info!(count = projects.len(), path = %path.display(), "exported projects");
    Ok(())
}

/// Read a previously exported (or hand-written) project document.
///
/// Nothing is validated beyond what the record defaults tolerate; the caller
/// replaces its list with the result.
pub fn import_json(path: &Path) -> Result<Vec<Project>> {
    let projects = read_projects(path)?;
    tracing::info!(count = projects.len(), path = %path.display(), "read import file");
    Ok(projects)
}

/// `objectives_20260115.json`
pub fn default_export_name(today: NaiveDate) -> String {
    format!("objectives_{}.json", today.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_default_export_name() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        assert_eq!(default_export_name(today), "objectives_20260115.json");
    }

    #[test]
    fn test_import_rejects_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("upload.json");
        std::fs::write(&path, "[{\"id\": ").unwrap();
        assert!(matches!(import_json(&path), Err(Error::Json(_))));
        assert!(matches!(import_json(&dir.path().join("absent.json")), Err(Error::Io(_))));
    }
}

//! Lookup and mutation helpers over the in-memory project list.
//!
//! The list is the unit of persistence: callers mutate it with these helpers
//! and then hand the whole list back to [`RecordStore::save`].
//!
//! [`RecordStore::save`]: super::store::RecordStore::save

use crate::model::date::now_timestamp;
use crate::model::{Project, ProjectUpdate};

/// First project with `id`, by linear scan.
pub fn find_by_id<'a>(projects: &'a [Project], id: &str) -> Option<&'a Project> {
    projects.iter().find(|p| p.id == id)
}

pub fn find_by_id_mut<'a>(projects: &'a mut [Project], id: &str) -> Option<&'a mut Project> {
    projects.iter_mut().find(|p| p.id == id)
}

/// Merge `updates` into the project with `id` and stamp `updated_at`.
/// Returns false, changing nothing, when no project has that id.
pub fn update(projects: &mut [Project], id: &str, updates: ProjectUpdate) -> bool {
    match find_by_id_mut(projects, id) {
        Some(project) => {
            updates.apply_to(project);
            project.updated_at = Some(now_timestamp().into());
            true
        }
        None => {
            tracing::debug!(id, "update skipped, no such project");
            false
        }
    }
}

/// Stamp `updated_at` after an in-place edit (subtasks, notes).
pub fn touch(projects: &mut [Project], id: &str) -> bool {
    match find_by_id_mut(projects, id) {
        Some(project) => {
            project.updated_at = Some(now_timestamp().into());
            true
        }
        None => false,
    }
}

/// Stamp creation and update times and append.
pub fn add(projects: &mut Vec<Project>, mut project: Project) {
    let now = now_timestamp();
    project.created_at = Some(now.into());
    project.updated_at = Some(now.into());
    projects.push(project);
}

/// Remove every project with `id`, keeping the order of the rest.
/// Returns how many were removed.
pub fn delete(projects: &mut Vec<Project>, id: &str) -> usize {
    let before = projects.len();
    projects.retain(|p| p.id != id);
    before - projects.len()
}

/// One past the highest objective number in use.
pub fn next_objective_number(projects: &[Project]) -> u32 {
    projects
        .iter()
        .filter_map(|p| p.objective_number)
        .max()
        .map_or(1, |n| n.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use pretty_assertions::assert_eq;

    fn with_id(id: &str, number: u32) -> Project {
        let mut p = Project::new(number, format!("Objective {}", number));
        p.id = id.to_string();
        p
    }

    #[test]
    fn test_update_unknown_id_changes_nothing() {
        let mut projects = vec![with_id("p1", 1), with_id("p2", 2)];
        let before = projects.clone();

        let changed = update(
            &mut projects,
            "nope",
            ProjectUpdate {
                name: Some("renamed".into()),
                ..Default::default()
            },
        );
        assert!(!changed);
        assert_eq!(projects, before);
    }

    #[test]
    fn test_update_merges_fields_and_stamps() {
        let mut projects = vec![with_id("p1", 1), with_id("p2", 2)];
        let changed = update(
            &mut projects,
            "p2",
            ProjectUpdate {
                status: Some(Status::Completed),
                budget: Some(900),
                ..Default::default()
            },
        );
        assert!(changed);
        assert_eq!(projects[1].status(), Status::Completed);
        assert_eq!(projects[1].budget, 900);
        assert_eq!(projects[1].name, "Objective 2");
        assert!(projects[1].updated_at.is_some());
        assert!(projects[0].updated_at.is_none());
    }

    #[test]
    fn test_add_stamps_both_times() {
        let mut projects = Vec::new();
        add(&mut projects, with_id("p1", 1));
        let p = &projects[0];
        assert!(p.created_at.is_some());
        assert_eq!(p.created_at, p.updated_at);
    }

    #[test]
    fn test_delete_preserves_order() {
        let mut projects = vec![
            with_id("a", 1),
            with_id("b", 2),
            with_id("c", 3),
            with_id("b", 4),
            with_id("d", 5),
        ];
        assert_eq!(delete(&mut projects, "b"), 2);
        let ids: Vec<&str> = projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
        assert_eq!(delete(&mut projects, "zzz"), 0);
    }

    #[test]
    fn test_find_first_match_wins() {
        let projects = vec![with_id("x", 1), with_id("x", 2)];
        assert_eq!(find_by_id(&projects, "x").and_then(|p| p.objective_number), Some(1));
        assert!(find_by_id(&projects, "y").is_none());
    }

    #[test]
    fn test_next_objective_number() {
        assert_eq!(next_objective_number(&[]), 1);
        let mut unnumbered = with_id("u", 0);
        unnumbered.objective_number = None;
        assert_eq!(next_objective_number(&[with_id("a", 4), unnumbered, with_id("b", 2)]), 5);
    }
}

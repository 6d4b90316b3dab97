use objective_tracker::io::{self, RecordStore};
use objective_tracker::model::{Priority, Project, ProjectUpdate, Status, Subtask};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn test_complete_a_milestone_across_reloads() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::open(dir.path());
    let mut projects = store.load();
    assert!(projects.is_empty());

    let mut project = Project::new(io::next_objective_number(&projects), "Corrugate grade review");
    project.add_subtask(Subtask::new("Collect samples"));
    let project_id = project.id.clone();
    let subtask_id = project.subtasks[0].id.clone();
    io::add(&mut projects, project);
    assert!(store.save(&projects));

    let mut reloaded = store.load();
    assert_eq!(reloaded, projects);
    assert_eq!(reloaded[0].completion_percentage, 0);

    let found = io::find_by_id_mut(&mut reloaded, &project_id).unwrap();
    assert!(found.set_subtask_completed(&subtask_id, true));
    assert!(io::touch(&mut reloaded, &project_id));
    assert!(store.save(&reloaded));

    let after = store.load();
    assert_eq!(after[0].completion_percentage, 100);
    assert!(after[0].subtasks[0].completed);
}

#[test]
fn test_update_delete_and_numbering() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::open(dir.path());
    let mut projects = Vec::new();
    for name in ["Pallet reuse", "Freight audit", "Label stock"] {
        let number = io::next_objective_number(&projects);
        io::add(&mut projects, Project::new(number, name));
    }
    assert_eq!(
        projects.iter().map(|p| p.objective_number).collect::<Vec<_>>(),
        vec![Some(1), Some(2), Some(3)]
    );

    let freight = projects[1].id.clone();
    let patch = ProjectUpdate {
        priority: Some(Priority::High),
        status: Some(Status::InProgress),
        completion_percentage: Some(40),
        ..Default::default()
    };
    assert!(io::update(&mut projects, &freight, patch));
    assert!(!io::update(&mut projects, "proj_missing", ProjectUpdate::default()));

    let label = projects[2].id.clone();
    assert_eq!(io::delete(&mut projects, &label), 1);
    assert_eq!(io::delete(&mut projects, &label), 0);
    assert!(store.save(&projects));

    let loaded = store.load();
    assert_eq!(loaded.len(), 2);
    let freight = io::find_by_id(&loaded, &freight).unwrap();
    assert_eq!(freight.priority(), Priority::High);
    assert_eq!(freight.status(), Status::InProgress);
    assert_eq!(freight.completion_percentage, 40);
    assert_eq!(io::next_objective_number(&loaded), 3);
}

#[test]
fn test_unknown_fields_survive_a_save() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::open(dir.path());
    std::fs::write(
        store.path(),
        r#"[{"id": "proj_1", "name": "Dock scheduling", "site": "Plant 2",
             "subtasks": [{"id": "task_1", "name": "Pilot", "weight": 2}]}]"#,
    )
    .unwrap();

    let projects = store.load();
    assert!(store.save(&projects));
    let text = std::fs::read_to_string(store.path()).unwrap();
    assert!(text.contains("\"site\": \"Plant 2\""));
    assert!(text.contains("\"weight\": 2"));
}

pub mod charts;
pub mod dashboard;
pub mod dialogs;
pub mod notes;
pub mod project_editor;
pub mod projects;
pub mod settings;
pub mod sidebar;
pub mod subtask_editor;
pub mod theme;
pub mod timeline;
pub mod toolbar;
pub mod tracker;
pub mod widgets;

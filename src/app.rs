use std::path::PathBuf;

use chrono::NaiveDate;

use crate::config::AppConfig;
use crate::error::Error;
use crate::dashboard::ProjectFilter;
use crate::io::{self, RecordStore};
use crate::model::date::today;
use crate::model::{Project, TimelineViewport};
use crate::ui;
use crate::ui::project_editor::{NewProjectForm, ProjectForm};
use crate::ui::subtask_editor::SubtaskForm;

/// Top-level pages reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Timeline,
    Projects,
    Tracker,
    Settings,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Timeline,
        Page::Projects,
        Page::Tracker,
        Page::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Timeline => "Timeline",
            Page::Projects => "Projects",
            Page::Tracker => "Completion Tracker",
            Page::Settings => "Settings",
        }
    }
}

/// Requests raised by the pages, applied after the frame's UI is built.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Navigate(Page),
    /// Select a project and jump to the Projects page.
    OpenProject(String),
    SelectProject(String),
    NewProject,
    SaveProject,
    RevertProject,
    RequestDelete(String),
    NewSubtask(String),
    EditSubtask { project_id: String, subtask_id: String },
    SaveSubtask,
    CancelSubtask,
    RemoveSubtask { project_id: String, subtask_id: String },
    MoveSubtask { project_id: String, from: usize, to: usize },
    ToggleSubtask { project_id: String, subtask_id: String, completed: bool },
    AddNote(String),
    RemoveNote { project_id: String, index: usize },
    Import,
    ExportJson,
    ExportCsv,
    Reload,
    OpenDataFolder,
    About,
}

/// The milestone being edited and the project it belongs to.
pub struct SubtaskDraft {
    pub project_id: String,
    pub form: SubtaskForm,
}

/// Main application state.
pub struct TrackerApp {
    pub config: AppConfig,
    pub store: RecordStore,
    /// Mirror of the store after the last load or save.
    pub projects: Vec<Project>,
    pub today: NaiveDate,
    pub page: Page,
    pub filter: ProjectFilter,
    pub viewport: TimelineViewport,
    pub show_subtasks: bool,

    // Selection and edit drafts
    pub selected_project: Option<String>,
    pub project_form: Option<ProjectForm>,
    pub subtask_draft: Option<SubtaskDraft>,
    pub note_draft: String,

    // Dialog state
    pub show_add_project: bool,
    pub new_project: NewProjectForm,
    pub show_about: bool,
    pub confirm_delete: Option<String>,
    pub pending_import: Option<(PathBuf, Vec<Project>)>,

    // Status message
    pub status_message: String,
    /// Set when the last save failed; shows the warning banner.
    pub save_failed: bool,
    /// Memory holds edits the project file lacks. Cleared by a successful
    /// save or an explicit reload.
    pub unsaved: bool,
}

impl TrackerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        Self::with_config(config)
    }

    /// State without a window; used by `new` and by tests.
    pub fn with_config(config: AppConfig) -> Self {
        let store = RecordStore::open(&config.data_dir);
        let projects = store.load();
        let today = today();
        let viewport = TimelineViewport::around(config.quarter.start, config.quarter.end);
        let new_project = NewProjectForm::new(
            today,
            config.quarter.end,
            config.owners.first().map(String::as_str).unwrap_or_default(),
        );
        let status_message = format!("Loaded {} objectives", projects.len());

        Self {
            config,
            store,
            projects,
            today,
            page: Page::Dashboard,
            filter: ProjectFilter::default(),
            viewport,
            show_subtasks: true,
            selected_project: None,
            project_form: None,
            subtask_draft: None,
            note_draft: String::new(),
            show_add_project: false,
            new_project,
            show_about: false,
            confirm_delete: None,
            pending_import: None,
            status_message,
            save_failed: false,
            unsaved: false,
        }
    }

    pub fn selected(&self) -> Option<&Project> {
        let id = self.selected_project.as_deref()?;
        io::find_by_id(&self.projects, id)
    }

    // --- Load-mutate-save ---

    /// Reload from disk, apply `edit`, and save when it reports a change.
    /// `done` becomes the status message on success. Returns whether `edit`
    /// changed anything; a failed save is tracked by `save_failed`.
    ///
    /// While edits are unsaved, or when the file cannot be read, the edit
    /// applies to the in-memory list so nothing already shown is lost.
    fn mutate<F>(&mut self, done: &str, edit: F) -> bool
    where
        F: FnOnce(&mut Vec<Project>) -> bool,
    {
        let mut projects = self.working_copy();
        if !edit(&mut projects) {
            self.projects = projects;
            self.status_message = "Nothing changed".to_string();
            return false;
        }
        let saved = self.store.save(&projects);
        self.projects = projects;
        self.save_failed = !saved;
        self.unsaved = !saved;
        self.status_message = if saved {
            done.to_string()
        } else {
            format!("{} in memory, but saving to {} failed", done, self.store.path().display())
        };
        true
    }

    fn working_copy(&self) -> Vec<Project> {
        if self.unsaved {
            return self.projects.clone();
        }
        match self.store.try_load() {
            Ok(projects) => projects,
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!(
                    path = %self.store.path().display(),
                    error = %e,
                    "project file unreadable, editing the in-memory list"
                );
                self.projects.clone()
            }
        }
    }

    /// Write the in-memory list again after a failed save.
    pub fn retry_save(&mut self) {
        let saved = self.store.save(&self.projects);
        self.save_failed = !saved;
        self.unsaved = !saved;
        self.status_message = if saved {
            format!("Saved {} objectives", self.projects.len())
        } else {
            "Retry failed; check the data folder permissions".to_string()
        };
    }

    pub fn reload(&mut self) {
        self.projects = self.store.load();
        self.unsaved = false;
        self.refresh_project_form();
        self.subtask_draft = None;
        self.status_message = format!("Reloaded {} objectives from disk", self.projects.len());
    }

    fn refresh_project_form(&mut self) {
        let form = self
            .selected()
            .map(|project| ProjectForm::from_project(project, self.today));
        if form.is_none() {
            self.selected_project = None;
        }
        self.project_form = form;
    }

    pub fn select_project(&mut self, id: &str) {
        if self.selected_project.as_deref() != Some(id) {
            self.subtask_draft = None;
            self.note_draft.clear();
        }
        self.selected_project = Some(id.to_string());
        self.refresh_project_form();
    }

    // --- Project operations ---

    pub fn add_project(&mut self) {
        let start = self.today;
        let form = std::mem::replace(
            &mut self.new_project,
            NewProjectForm::new(start, self.config.quarter.end, ""),
        );
        self.new_project.owner = form.owner.clone();
        let name = form.name.trim().to_string();
        let mut new_id = None;
        self.mutate(&format!("Added '{}'", name), |projects| {
            let project = form.into_project(io::next_objective_number(projects));
            new_id = Some(project.id.clone());
            io::add(projects, project);
            true
        });
        if let Some(id) = new_id {
            self.select_project(&id);
            self.page = Page::Projects;
        }
    }

    pub fn save_project_form(&mut self) {
        let Some(form) = self.project_form.as_ref() else {
            self.status_message = "No objective selected".to_string();
            return;
        };
        if let Some(problem) = form.problem() {
            self.status_message = problem.to_string();
            return;
        }
        let id = form.id.clone();
        let update = form.to_update();
        let done = format!("Saved '{}'", form.name.trim());
        if self.mutate(&done, |projects| io::update(projects, &id, update)) {
            self.refresh_project_form();
        } else if io::find_by_id(&self.projects, &id).is_none() {
            self.status_message = "That objective no longer exists".to_string();
            self.refresh_project_form();
        }
    }

    pub fn delete_project(&mut self, id: &str) {
        let name = io::find_by_id(&self.projects, id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        let id = id.to_string();
        self.mutate(&format!("Deleted '{}'", name), |projects| io::delete(projects, &id) > 0);
        if self.selected_project.as_deref() == Some(id.as_str()) {
            self.selected_project = None;
            self.project_form = None;
            self.subtask_draft = None;
        }
    }

    // --- Subtask and note operations ---

    /// Apply `edit` to one project, stamping `updated_at` when it changes.
    fn mutate_project<F>(&mut self, project_id: &str, done: &str, edit: F) -> bool
    where
        F: FnOnce(&mut Project) -> bool,
    {
        let changed = self.mutate(done, |projects| {
            let changed = io::find_by_id_mut(projects, project_id).is_some_and(edit);
            changed && io::touch(projects, project_id)
        });
        if changed && self.selected_project.as_deref() == Some(project_id) {
            // Completion may now be derived; keep the rest of the draft.
            if let (Some(form), Some(project)) =
                (self.project_form.as_mut(), io::find_by_id(&self.projects, project_id))
            {
                form.completion = project.completion_percentage;
                form.completion_derived = project.completion_is_derived();
            }
        }
        changed
    }

    pub fn toggle_subtask(&mut self, project_id: &str, subtask_id: &str, completed: bool) {
        let done = if completed { "Milestone completed" } else { "Milestone reopened" };
        self.mutate_project(project_id, done, |project| {
            project.set_subtask_completed(subtask_id, completed)
        });
    }

    pub fn new_subtask(&mut self, project_id: &str) {
        let Some(project) = io::find_by_id(&self.projects, project_id) else {
            return;
        };
        let start = project.start().unwrap_or(self.today).max(self.today);
        let due = project.due().unwrap_or(start);
        self.subtask_draft = Some(SubtaskDraft {
            project_id: project_id.to_string(),
            form: SubtaskForm::blank(start, due),
        });
    }

    pub fn edit_subtask(&mut self, project_id: &str, subtask_id: &str) {
        let form = io::find_by_id(&self.projects, project_id)
            .and_then(|p| p.subtask(subtask_id))
            .map(|s| SubtaskForm::from_subtask(s, self.today));
        self.subtask_draft = form.map(|form| SubtaskDraft {
            project_id: project_id.to_string(),
            form,
        });
    }

    pub fn save_subtask_draft(&mut self) {
        let Some(draft) = self.subtask_draft.take() else {
            return;
        };
        if let Some(problem) = draft.form.problem() {
            self.status_message = problem.to_string();
            self.subtask_draft = Some(draft);
            return;
        }
        let form = &draft.form;
        let saved = match &form.id {
            Some(subtask_id) => self.mutate_project(&draft.project_id, "Milestone updated", |project| {
                let Some(mut subtask) = project.subtask(subtask_id).cloned() else {
                    return false;
                };
                form.apply_to(&mut subtask);
                project.replace_subtask(subtask)
            }),
            None => self.mutate_project(&draft.project_id, "Milestone added", |project| {
                project.add_subtask(form.to_new_subtask());
                true
            }),
        };
        if !saved && self.status_message == "Nothing changed" {
            self.status_message = "That milestone no longer exists".to_string();
        }
    }

    pub fn remove_subtask(&mut self, project_id: &str, subtask_id: &str) {
        self.mutate_project(project_id, "Milestone removed", |project| {
            project.remove_subtask(subtask_id).is_some()
        });
        if self
            .subtask_draft
            .as_ref()
            .is_some_and(|d| d.form.id.as_deref() == Some(subtask_id))
        {
            self.subtask_draft = None;
        }
    }

    pub fn move_subtask(&mut self, project_id: &str, from: usize, to: usize) {
        self.mutate_project(project_id, "Milestones reordered", |project| {
            from != to && project.move_subtask(from, to)
        });
    }

    pub fn add_note(&mut self, project_id: &str) {
        let text = std::mem::take(&mut self.note_draft);
        if text.trim().is_empty() {
            self.status_message = "Note is empty".to_string();
            return;
        }
        if !self.mutate_project(project_id, "Note added", |project| project.add_note(&text)) {
            self.note_draft = text;
        }
    }

    pub fn remove_note(&mut self, project_id: &str, index: usize) {
        self.mutate_project(project_id, "Note removed", |project| {
            project.remove_note(index).is_some()
        });
    }

    // --- Import / export ---

    pub fn export_json(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(io::transfer::default_export_name(self.today))
            .save_file()
        {
            match io::export_json(&self.projects, &path) {
                Ok(()) => {
                    self.status_message = format!("Exported {} objectives", self.projects.len())
                }
                Err(e) => {
                    tracing::error!(error = %e, "JSON export failed");
                    self.status_message = format!("Export failed: {}", e);
                }
            }
        }
    }

    /// Pick a file and stage it; the confirm dialog calls `confirm_import`.
    pub fn import_json(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            match io::import_json(&path) {
                Ok(projects) => self.pending_import = Some((path, projects)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "import rejected");
                    self.status_message = format!("Import failed: {}", e);
                }
            }
        }
    }

    /// Replace every stored project with the staged import.
    pub fn confirm_import(&mut self) {
        let Some((path, imported)) = self.pending_import.take() else {
            return;
        };
        let count = imported.len();
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.mutate(&format!("Imported {} objectives from {}", count, file), |projects| {
            *projects = imported;
            true
        });
        self.refresh_project_form();
        self.subtask_draft = None;
    }

    pub fn export_csv(&mut self) {
        if self.projects.is_empty() {
            self.status_message = "Nothing to export yet".to_string();
            return;
        }
        let default_name = format!("schedule_{}.csv", self.today.format("%Y%m%d"));
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            match io::csv_export::export_csv(&self.projects, &path, self.today) {
                Ok(rows) => self.status_message = format!("Exported {} rows to CSV", rows),
                Err(e) => {
                    tracing::error!(error = %e, "CSV export failed");
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    pub fn open_data_folder(&mut self) {
        if let Err(e) = open::that(self.store.data_dir()) {
            tracing::warn!(error = %e, "could not open data folder");
            self.status_message = format!("Could not open data folder: {}", e);
        }
    }

    // --- Dispatch ---

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(page) => self.page = page,
            Action::OpenProject(id) => {
                self.select_project(&id);
                self.page = Page::Projects;
            }
            Action::SelectProject(id) => self.select_project(&id),
            Action::NewProject => self.show_add_project = true,
            Action::SaveProject => self.save_project_form(),
            Action::RevertProject => {
                self.refresh_project_form();
                self.status_message = "Changes discarded".to_string();
            }
            Action::RequestDelete(id) => self.confirm_delete = Some(id),
            Action::NewSubtask(project_id) => self.new_subtask(&project_id),
            Action::EditSubtask { project_id, subtask_id } => {
                self.edit_subtask(&project_id, &subtask_id)
            }
            Action::SaveSubtask => self.save_subtask_draft(),
            Action::CancelSubtask => self.subtask_draft = None,
            Action::RemoveSubtask { project_id, subtask_id } => {
                self.remove_subtask(&project_id, &subtask_id)
            }
            Action::MoveSubtask { project_id, from, to } => self.move_subtask(&project_id, from, to),
            Action::ToggleSubtask { project_id, subtask_id, completed } => {
                self.toggle_subtask(&project_id, &subtask_id, completed)
            }
            Action::AddNote(project_id) => self.add_note(&project_id),
            Action::RemoveNote { project_id, index } => self.remove_note(&project_id, index),
            Action::Import => self.import_json(),
            Action::ExportJson => self.export_json(),
            Action::ExportCsv => self.export_csv(),
            Action::Reload => self.reload(),
            Action::OpenDataFolder => self.open_data_folder(),
            Action::About => self.show_about = true,
        }
    }
}

impl eframe::App for TrackerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);
        self.today = today();

        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let should_save = ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::S));
        if should_save {
            self.save_project_form();
        }

        // Top panel: menu bar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(self.store.path().display().to_string())
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        ui.label(
                            egui::RichText::new(format!("Objectives: {}", self.projects.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: navigation, stats and filters
        egui::SidePanel::left("sidebar")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .resizable(false)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(10.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                ui::sidebar::show_sidebar(self, ui);
            });

        let mut action = Action::None;
        egui::CentralPanel::default()
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_DARK)
                    .inner_margin(egui::Margin::same(14.0)),
            )
            .show(ctx, |ui| {
                if self.save_failed {
                    ui::dialogs::show_save_warning(self, ui);
                }
                action = match self.page {
                    Page::Dashboard => ui::dashboard::show_dashboard(self, ui),
                    Page::Timeline => ui::timeline::show_timeline(self, ui),
                    Page::Projects => ui::projects::show_projects(self, ui),
                    Page::Tracker => ui::tracker::show_tracker(self, ui),
                    Page::Settings => ui::settings::show_settings(self, ui),
                };
            });
        self.dispatch(action);

        // Dialogs
        if self.show_add_project {
            ui::dialogs::show_add_project_dialog(self, ctx);
        }
        if self.confirm_delete.is_some() {
            ui::dialogs::show_confirm_delete_dialog(self, ctx);
        }
        if self.pending_import.is_some() {
            ui::dialogs::show_confirm_import_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn app_in(dir: &TempDir) -> TrackerApp {
        TrackerApp::with_config(AppConfig {
            data_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        })
    }

    #[test]
    fn test_add_project_persists_and_selects() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        assert!(app.projects.is_empty());

        app.new_project.name = "Flexpack pricing".into();
        app.add_project();

        assert_eq!(app.projects.len(), 1);
        assert_eq!(app.page, Page::Projects);
        assert_eq!(app.selected().map(|p| p.name.as_str()), Some("Flexpack pricing"));
        assert!(!app.save_failed);
        assert_eq!(app.store.load().len(), 1);
        assert_eq!(app.projects[0].objective_number, Some(1));
    }

    #[test]
    fn test_subtask_lifecycle_updates_completion() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.new_project.name = "Resin contract".into();
        app.add_project();
        let project_id = app.selected_project.clone().unwrap();

        for name in ["Quotes", "Award"] {
            app.dispatch(Action::NewSubtask(project_id.clone()));
            app.subtask_draft.as_mut().unwrap().form.name = name.into();
            app.dispatch(Action::SaveSubtask);
        }
        let subtasks: Vec<String> = app.projects[0].subtasks.iter().map(|s| s.id.clone()).collect();
        assert_eq!(subtasks.len(), 2);

        app.dispatch(Action::ToggleSubtask {
            project_id: project_id.clone(),
            subtask_id: subtasks[0].clone(),
            completed: true,
        });
        assert_eq!(app.projects[0].completion_percentage, 50);
        assert_eq!(app.project_form.as_ref().map(|f| f.completion), Some(50));

        app.dispatch(Action::MoveSubtask {
            project_id: project_id.clone(),
            from: 0,
            to: 1,
        });
        assert_eq!(app.projects[0].subtasks[1].id, subtasks[0]);

        app.dispatch(Action::RemoveSubtask {
            project_id: project_id.clone(),
            subtask_id: subtasks[1].clone(),
        });
        assert_eq!(app.store.load()[0].completion_percentage, 100);
    }

    #[test]
    fn test_notes_and_delete() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.new_project.name = "Carrier bids".into();
        app.add_project();
        let id = app.selected_project.clone().unwrap();

        app.note_draft = "   ".into();
        app.dispatch(Action::AddNote(id.clone()));
        assert!(app.projects[0].notes.is_empty());

        app.note_draft = "RFQ sent".into();
        app.dispatch(Action::AddNote(id.clone()));
        assert_eq!(app.store.load()[0].notes[0].text, "RFQ sent");
        assert!(app.note_draft.is_empty());

        app.delete_project(&id);
        assert!(app.projects.is_empty());
        assert!(app.selected_project.is_none());
        assert!(app.store.load().is_empty());
    }

    #[test]
    fn test_failed_save_keeps_building_on_memory() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.new_project.name = "Carrier bids".into();
        app.add_project();
        let id = app.selected_project.clone().unwrap();

        // A directory where the file should be makes every save fail.
        std::fs::remove_file(app.store.path()).unwrap();
        std::fs::create_dir_all(app.store.path()).unwrap();

        for text in ["first", "second"] {
            app.note_draft = text.into();
            app.dispatch(Action::AddNote(id.clone()));
        }
        assert!(app.save_failed);
        assert!(app.unsaved);
        let notes: Vec<&str> = app.projects[0].notes.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(notes, ["first", "second"]);
        assert!(app.note_draft.is_empty());

        // Hiding the banner does not discard the edits.
        app.save_failed = false;
        std::fs::remove_dir(app.store.path()).unwrap();
        app.note_draft = "third".into();
        app.dispatch(Action::AddNote(id.clone()));

        assert!(!app.save_failed);
        assert!(!app.unsaved);
        let stored = app.store.load();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].notes.len(), 3);
    }

    #[test]
    fn test_retry_save_writes_memory() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        std::fs::create_dir_all(app.store.path()).unwrap();
        app.new_project.name = "Dock scheduling".into();
        app.add_project();
        assert!(app.save_failed);

        std::fs::remove_dir(app.store.path()).unwrap();
        app.retry_save();
        assert!(!app.unsaved);
        assert_eq!(app.store.load()[0].name, "Dock scheduling");
        assert_eq!(app.status_message, "Saved 1 objectives");
    }

    #[test]
    fn test_edit_form_saves_through_update() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.new_project.name = "Warehouse layout".into();
        app.add_project();

        let form = app.project_form.as_mut().unwrap();
        form.owner = "Finance".into();
        form.completion = 35;
        app.dispatch(Action::SaveProject);

        let stored = &app.store.load()[0];
        assert_eq!(stored.owner, "Finance");
        assert_eq!(stored.completion_percentage, 35);
        assert!(stored.updated_at.is_some());
        assert_eq!(app.status_message, "Saved 'Warehouse layout'");
    }
}

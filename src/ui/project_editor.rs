use std::collections::BTreeSet;

use chrono::NaiveDate;
use egui::{RichText, Ui};

use crate::config::AppConfig;
use crate::model::lenient::split_list;
use crate::model::{Labelled, Priority, Project, ProjectUpdate, Status};
use crate::ui::{theme, widgets};

/// Actions the project editor can request.
pub enum EditorAction {
    None,
    Save,
    Revert,
    Delete,
}

/// Editable copy of a project's fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectForm {
    pub id: String,
    pub objective_number: u32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub owner: String,
    pub team_members: BTreeSet<String>,
    pub priority: Priority,
    pub status: Status,
    pub start: NaiveDate,
    pub due: NaiveDate,
    pub estimated_hours: u64,
    pub actual_hours: u64,
    pub budget: u64,
    pub budget_spent: u64,
    pub potential_savings: u64,
    pub completion: u8,
    /// Completion follows the subtasks and is shown read-only.
    pub completion_derived: bool,
    /// Comma separated.
    pub tags: String,
    /// Comma separated subtask ids.
    pub dependencies: String,
}

impl ProjectForm {
    /// Missing dates default to `today`.
    pub fn from_project(project: &Project, today: NaiveDate) -> Self {
        let start = project.start().unwrap_or(today);
        Self {
            id: project.id.clone(),
            objective_number: project.objective_number.unwrap_or(0),
            name: project.name.clone(),
            description: project.description.clone(),
            category: project.category.clone(),
            owner: project.owner.clone(),
            team_members: project.team_members.clone(),
            priority: project.priority(),
            status: project.status(),
            start,
            due: project.due().unwrap_or(start),
            estimated_hours: project.estimated_hours,
            actual_hours: project.actual_hours,
            budget: project.budget,
            budget_spent: project.budget_spent,
            potential_savings: project.potential_savings,
            completion: project.completion_percentage,
            completion_derived: project.completion_is_derived(),
            tags: project.tags.join(", "),
            dependencies: project.dependencies.join(", "),
        }
    }

    /// Why the form cannot be saved, if it cannot.
    pub fn problem(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("Name is required")
        } else if self.due < self.start {
            Some("Due date is before the start date")
        } else {
            None
        }
    }

    pub fn to_update(&self) -> ProjectUpdate {
        ProjectUpdate {
            objective_number: Some(self.objective_number),
            name: Some(self.name.trim().to_string()),
            description: Some(self.description.clone()),
            category: Some(self.category.trim().to_string()),
            owner: Some(self.owner.clone()),
            team_members: Some(self.team_members.clone()),
            priority: Some(self.priority),
            status: Some(self.status),
            start_date: Some(self.start),
            due_date: Some(self.due),
            estimated_hours: Some(self.estimated_hours),
            actual_hours: Some(self.actual_hours),
            budget: Some(self.budget),
            budget_spent: Some(self.budget_spent),
            completion_percentage: (!self.completion_derived).then_some(self.completion),
            potential_savings: Some(self.potential_savings),
            tags: Some(split_list(&self.tags)),
            dependencies: Some(split_list(&self.dependencies)),
        }
    }
}

/// Fields of the "New Objective" dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProjectForm {
    pub name: String,
    pub description: String,
    pub owner: String,
    pub priority: Priority,
    pub start: NaiveDate,
    pub due: NaiveDate,
}

impl NewProjectForm {
    /// Runs from `start` to the end of the quarter (or a month if it has ended).
    pub fn new(start: NaiveDate, quarter_end: NaiveDate, owner: &str) -> Self {
        let due = if quarter_end > start {
            quarter_end
        } else {
            start + chrono::Duration::days(30)
        };
        Self {
            name: String::new(),
            description: String::new(),
            owner: owner.to_string(),
            priority: Priority::default(),
            start,
            due,
        }
    }

    pub fn into_project(self, objective_number: u32) -> Project {
        let mut project = Project::new(objective_number, self.name.trim());
        project.description = self.description;
        project.owner = self.owner;
        project.priority = self.priority.into();
        project.start_date = Some(self.start.into());
        project.due_date = Some(self.due.max(self.start).into());
        project
    }
}

/// Owner choices: configured owners plus `current` when it is not among them.
pub fn owner_choices(config: &AppConfig, current: &str) -> Vec<String> {
    let mut owners = config.owners.clone();
    if !current.is_empty() && !owners.iter().any(|o| o == current) {
        owners.push(current.to_string());
    }
    owners
}

pub fn owner_combo(ui: &mut Ui, id_salt: &str, owner: &mut String, choices: &[String]) -> bool {
    let mut changed = false;
    let selected = if owner.is_empty() { "Unassigned" } else { owner.as_str() };
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(RichText::new(selected).size(11.0))
        .width(ui.available_width().min(220.0))
        .show_ui(ui, |ui| {
            for choice in choices {
                if ui.selectable_label(*owner == *choice, choice.as_str()).clicked() {
                    *owner = choice.clone();
                    changed = true;
                }
            }
        });
    changed
}

pub fn labelled_combo<T: Labelled + PartialEq>(ui: &mut Ui, id_salt: &str, value: &mut T) -> bool {
    let mut changed = false;
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(RichText::new(value.label()).size(11.0))
        .width(140.0)
        .show_ui(ui, |ui| {
            for option in T::ALL {
                if ui.selectable_value(value, *option, option.label()).changed() {
                    changed = true;
                }
            }
        });
    changed
}

/// Render the details editor for the selected project.
pub fn show_project_editor(form: &mut ProjectForm, config: &AppConfig, ui: &mut Ui) -> EditorAction {
    let mut action = EditorAction::None;

    widgets::card_frame().show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;

        egui::Grid::new(("project_form", form.id.as_str()))
            .num_columns(4)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                widgets::field_label(ui, "OBJECTIVE #");
                ui.add(egui::DragValue::new(&mut form.objective_number).range(0..=999));
                widgets::field_label(ui, "CATEGORY");
                ui.add(egui::TextEdit::singleline(&mut form.category).desired_width(180.0));
                ui.end_row();

                widgets::field_label(ui, "NAME");
                ui.add(
                    egui::TextEdit::singleline(&mut form.name)
                        .hint_text("Objective name...")
                        .desired_width(260.0),
                );
                widgets::field_label(ui, "OWNER");
                let choices = owner_choices(config, &form.owner);
                owner_combo(ui, "project_owner", &mut form.owner, &choices);
                ui.end_row();

                widgets::field_label(ui, "PRIORITY");
                labelled_combo(ui, "project_priority", &mut form.priority);
                widgets::field_label(ui, "STATUS");
                labelled_combo(ui, "project_status", &mut form.status);
                ui.end_row();

                widgets::field_label(ui, "START");
                ui.add(egui_extras::DatePickerButton::new(&mut form.start).id_salt("project_start"));
                widgets::field_label(ui, "DUE");
                ui.add(egui_extras::DatePickerButton::new(&mut form.due).id_salt("project_due"));
                ui.end_row();

                widgets::field_label(ui, "EST. HOURS");
                ui.add(egui::DragValue::new(&mut form.estimated_hours));
                widgets::field_label(ui, "ACTUAL HOURS");
                ui.add(egui::DragValue::new(&mut form.actual_hours));
                ui.end_row();

                widgets::field_label(ui, "BUDGET ($)");
                ui.add(egui::DragValue::new(&mut form.budget).speed(100.0));
                widgets::field_label(ui, "SPENT ($)");
                ui.add(egui::DragValue::new(&mut form.budget_spent).speed(100.0));
                ui.end_row();

                widgets::field_label(ui, "SAVINGS ($)");
                ui.add(egui::DragValue::new(&mut form.potential_savings).speed(100.0));
                widgets::field_label(ui, "COMPLETION");
                if form.completion_derived {
                    ui.label(
                        RichText::new(format!("{}%  (from milestones)", form.completion))
                            .size(11.0)
                            .color(theme::TEXT_SECONDARY),
                    );
                } else {
                    ui.add(egui::Slider::new(&mut form.completion, 0..=100).suffix("%"));
                }
                ui.end_row();

                widgets::field_label(ui, "TAGS");
                ui.add(
                    egui::TextEdit::singleline(&mut form.tags)
                        .hint_text("comma, separated")
                        .desired_width(260.0),
                );
                widgets::field_label(ui, "DEPENDS ON");
                ui.add(
                    egui::TextEdit::singleline(&mut form.dependencies)
                        .hint_text("milestone ids")
                        .desired_width(180.0),
                );
                ui.end_row();
            });

        widgets::field_label(ui, "DESCRIPTION");
        ui.add(
            egui::TextEdit::multiline(&mut form.description)
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );

        widgets::field_label(ui, "TEAM");
        ui.horizontal_wrapped(|ui| {
            for member in &config.team_members {
                let mut on = form.team_members.contains(member);
                if ui.checkbox(&mut on, member.as_str()).changed() {
                    if on {
                        form.team_members.insert(member.clone());
                    } else {
                        form.team_members.remove(member);
                    }
                }
            }
            // Members saved earlier but no longer configured stay visible.
            let extra: Vec<String> = form
                .team_members
                .iter()
                .filter(|m| !config.team_members.contains(m))
                .cloned()
                .collect();
            for member in extra {
                let mut on = true;
                if ui.checkbox(&mut on, member.as_str()).changed() && !on {
                    form.team_members.remove(&member);
                }
            }
        });

        ui.add_space(4.0);
        let problem = form.problem();
        ui.horizontal(|ui| {
            let save = ui.add_enabled_ui(problem.is_none(), |ui| widgets::primary_button(ui, "Save Changes"));
            if save.inner.clicked() {
                action = EditorAction::Save;
            }
            if ui.button("Revert").clicked() {
                action = EditorAction::Revert;
            }
            if let Some(problem) = problem {
                ui.label(RichText::new(problem).size(11.0).color(theme::RED));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let del = egui::Button::new(RichText::new("Delete Objective").color(theme::RED).size(11.5))
                    .frame(false);
                if ui.add(del).clicked() {
                    action = EditorAction::Delete;
                }
            });
        });
    });

    action
}

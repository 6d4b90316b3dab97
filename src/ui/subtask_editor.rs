use chrono::NaiveDate;
use egui::{RichText, Ui};

use crate::model::Subtask;
use crate::ui::{project_editor, theme, widgets};

pub enum SubtaskEditorAction {
    None,
    Save,
    Cancel,
}

/// Editable copy of a milestone. `id` is `None` for a milestone not yet added.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtaskForm {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub completion_criteria: String,
    pub success_metric: String,
    pub dependencies: String,
    pub owner: String,
    pub start: NaiveDate,
    pub due: NaiveDate,
    pub completed: bool,
}

impl SubtaskForm {
    /// A blank milestone spanning `start..=due`.
    pub fn blank(start: NaiveDate, due: NaiveDate) -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            completion_criteria: String::new(),
            success_metric: String::new(),
            dependencies: String::new(),
            owner: String::new(),
            start,
            due: due.max(start),
            completed: false,
        }
    }

    /// Missing dates fall back to `fallback`.
    pub fn from_subtask(subtask: &Subtask, fallback: NaiveDate) -> Self {
        let start = subtask.start().unwrap_or(fallback);
        Self {
            id: Some(subtask.id.clone()),
            name: subtask.name.clone(),
            description: subtask.description.clone(),
            completion_criteria: subtask.completion_criteria.clone(),
            success_metric: subtask.success_metric.clone(),
            dependencies: subtask.dependencies.clone(),
            owner: subtask.owner.clone(),
            start,
            due: subtask.due().unwrap_or(start),
            completed: subtask.completed,
        }
    }

    pub fn problem(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("Milestone name is required")
        } else if self.due < self.start {
            Some("Due date is before the start date")
        } else {
            None
        }
    }

    /// Copy the edited fields onto `subtask`, leaving its id, notes and
    /// unknown keys alone.
    pub fn apply_to(&self, subtask: &mut Subtask) {
        subtask.name = self.name.trim().to_string();
        subtask.description = self.description.clone();
        subtask.completion_criteria = self.completion_criteria.clone();
        subtask.success_metric = self.success_metric.clone();
        subtask.dependencies = self.dependencies.clone();
        subtask.owner = self.owner.clone();
        subtask.start_date = Some(self.start.into());
        subtask.due_date = Some(self.due.into());
        subtask.completed = self.completed;
    }

    /// A new subtask built from the form, with a fresh id.
    pub fn to_new_subtask(&self) -> Subtask {
        let mut subtask = Subtask::new("");
        self.apply_to(&mut subtask);
        subtask
    }
}

pub fn show_subtask_editor(form: &mut SubtaskForm, owners: &[String], ui: &mut Ui) -> SubtaskEditorAction {
    let mut action = SubtaskEditorAction::None;
    let title = if form.id.is_some() { "Edit Milestone" } else { "New Milestone" };

    egui::Frame::none()
        .fill(theme::BG_DARK)
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(egui::Margin::same(10.0))
        .stroke(egui::Stroke::new(1.0, theme::BORDER_ACCENT))
        .show(ui, |ui| {
            ui.label(RichText::new(title).strong().size(13.0));
            ui.add_space(4.0);

            egui::Grid::new("subtask_form")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    widgets::field_label(ui, "NAME");
                    ui.add(egui::TextEdit::singleline(&mut form.name).desired_width(280.0));
                    ui.end_row();

                    widgets::field_label(ui, "OWNER");
                    ui.horizontal(|ui| {
                        project_editor::owner_combo(ui, "subtask_owner", &mut form.owner, owners);
                        if !form.owner.is_empty() && ui.small_button("Use objective owner").clicked() {
                            form.owner.clear();
                        }
                    });
                    ui.end_row();

                    widgets::field_label(ui, "START");
                    ui.add(egui_extras::DatePickerButton::new(&mut form.start).id_salt("subtask_start"));
                    ui.end_row();

                    widgets::field_label(ui, "DUE");
                    ui.add(egui_extras::DatePickerButton::new(&mut form.due).id_salt("subtask_due"));
                    ui.end_row();

                    widgets::field_label(ui, "DESCRIPTION");
                    ui.add(
                        egui::TextEdit::multiline(&mut form.description)
                            .desired_rows(2)
                            .desired_width(280.0),
                    );
                    ui.end_row();

                    widgets::field_label(ui, "DONE WHEN");
                    ui.add(
                        egui::TextEdit::multiline(&mut form.completion_criteria)
                            .desired_rows(2)
                            .desired_width(280.0),
                    );
                    ui.end_row();

                    widgets::field_label(ui, "SUCCESS METRIC");
                    ui.add(egui::TextEdit::singleline(&mut form.success_metric).desired_width(280.0));
                    ui.end_row();

                    widgets::field_label(ui, "WAITS ON");
                    ui.add(egui::TextEdit::singleline(&mut form.dependencies).desired_width(280.0));
                    ui.end_row();

                    ui.label("");
                    ui.checkbox(&mut form.completed, "Completed");
                    ui.end_row();
                });

            ui.add_space(4.0);
            let problem = form.problem();
            ui.horizontal(|ui| {
                let save = ui.add_enabled_ui(problem.is_none(), |ui| widgets::primary_button(ui, "Save Milestone"));
                if save.inner.clicked() {
                    action = SubtaskEditorAction::Save;
                }
                if ui.button("Cancel").clicked() {
                    action = SubtaskEditorAction::Cancel;
                }
                if let Some(problem) = problem {
                    ui.label(RichText::new(problem).size(11.0).color(theme::RED));
                }
            });
        });

    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[test]
    fn test_apply_keeps_identity_and_unknown_keys() {
        let mut subtask = Subtask::new("RFQ").with_dates(date(1, 5), date(1, 20));
        subtask.extra.insert("weight".into(), json!(3));
        let id = subtask.id.clone();

        let mut form = SubtaskForm::from_subtask(&subtask, date(1, 1));
        form.name = " Issue RFQ ".into();
        form.completed = true;
        form.due = date(1, 25);
        form.apply_to(&mut subtask);

        assert_eq!(subtask.id, id);
        assert_eq!(subtask.name, "Issue RFQ");
        assert!(subtask.completed);
        assert_eq!(subtask.due(), Some(date(1, 25)));
        assert_eq!(subtask.extra.get("weight"), Some(&json!(3)));
    }

    #[test]
    fn test_blank_form_builds_a_new_subtask() {
        let mut form = SubtaskForm::blank(date(2, 1), date(1, 1));
        assert_eq!(form.due, date(2, 1));
        assert_eq!(form.problem(), Some("Milestone name is required"));
        form.name = "Trial".into();
        let subtask = form.to_new_subtask();
        assert!(subtask.id.starts_with("task_"));
        assert_eq!(subtask.start(), Some(date(2, 1)));
    }
}

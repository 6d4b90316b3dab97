use egui::{Color32, RichText, Ui};

use crate::app::{Action, TrackerApp};
use crate::dashboard::{format_currency, owner_label};
use crate::model::{DisplayStatus, Project};
use crate::ui::project_editor::{self, EditorAction};
use crate::ui::subtask_editor::{self, SubtaskEditorAction};
use crate::ui::{notes, theme, widgets};

const LIST_WIDTH: f32 = 300.0;

/// Project cards on the left, the selected project's details on the right.
pub fn show_projects(app: &mut TrackerApp, ui: &mut Ui) -> Action {
    let mut action = Action::None;

    ui.horizontal(|ui| {
        ui.heading(RichText::new("Projects").strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if widgets::primary_button(ui, &format!("{}  New Objective", egui_phosphor::regular::PLUS)).clicked() {
                action = Action::NewProject;
            }
        });
    });
    ui.add_space(6.0);

    ui.horizontal_top(|ui| {
        ui.vertical(|ui| {
            ui.set_width(LIST_WIDTH);
            ui.push_id("project_list", |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let visible = app.filter.apply(&app.projects, app.today);
                        if visible.is_empty() {
                            ui.label(RichText::new("No objectives match the filter").color(theme::TEXT_DIM));
                        }
                        for project in visible {
                            let selected = app.selected_project.as_deref() == Some(project.id.as_str());
                            if project_card(ui, project, app.today, selected) {
                                action = Action::SelectProject(project.id.clone());
                            }
                            ui.add_space(4.0);
                        }
                    });
            });
        });

        ui.separator();

        ui.vertical(|ui| {
            ui.push_id("project_details", |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        if let Some(a) = show_details(app, ui) {
                            action = a;
                        }
                    });
            });
        });
    });

    action
}

/// A clickable summary card. Returns true when clicked.
fn project_card(ui: &mut Ui, project: &Project, today: chrono::NaiveDate, selected: bool) -> bool {
    let status = project.display_status(today);
    let frame = egui::Frame::none()
        .fill(if selected { theme::BG_SELECTED } else { theme::BG_CARD })
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(egui::Margin::same(8.0))
        .stroke(egui::Stroke::new(
            1.0,
            if selected { theme::BORDER_ACCENT } else { theme::BORDER_SUBTLE },
        ));

    let resp = frame.show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            // Status stripe
            let (stripe, _) = ui.allocate_exact_size(egui::vec2(4.0, 34.0), egui::Sense::hover());
            ui.painter().rect_filled(stripe, egui::Rounding::same(2.0), theme::status_color(status));
            ui.vertical(|ui| {
                ui.add(
                    egui::Label::new(
                        RichText::new(project.short_label(40))
                            .strong()
                            .size(12.5)
                            .color(if selected { Color32::WHITE } else { theme::TEXT_PRIMARY }),
                    )
                    .truncate(),
                );
                ui.horizontal(|ui| {
                    widgets::status_badge(ui, status);
                    widgets::priority_badge(ui, project.priority());
                    ui.label(RichText::new(owner_label(project)).size(10.5).color(theme::TEXT_SECONDARY));
                });
            });
        });
        ui.add_space(2.0);
        ui.horizontal(|ui| {
            widgets::progress_bar(ui, project.completion_percentage, 150.0);
            if let Some(due) = project.due() {
                ui.label(
                    RichText::new(format!("due {}", due.format("%b %d")))
                        .size(10.5)
                        .color(if status == DisplayStatus::Overdue { theme::RED } else { theme::TEXT_DIM }),
                );
            }
        });
    });

    ui.interact(
        resp.response.rect,
        egui::Id::new(("project-card", &project.id)),
        egui::Sense::click(),
    )
    .clicked()
}

fn show_details(app: &mut TrackerApp, ui: &mut Ui) -> Option<Action> {
    let today = app.today;
    let Some(project) = app
        .selected_project
        .as_deref()
        .and_then(|id| crate::io::find_by_id(&app.projects, id))
    else {
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("Select an objective to see its details").color(theme::TEXT_DIM));
        });
        return None;
    };
    let mut action = None;
    let project_id = project.id.clone();

    // Header summary
    ui.horizontal(|ui| {
        ui.label(RichText::new(project.short_label(60)).strong().size(16.0));
        widgets::status_badge(ui, project.display_status(today));
        widgets::priority_badge(ui, project.priority());
    });
    ui.horizontal(|ui| {
        let summary = format!(
            "Budget {}  ·  Spent {}  ·  Savings {}  ·  {} / {} h",
            format_currency(project.budget),
            format_currency(project.budget_spent),
            format_currency(project.potential_savings),
            project.actual_hours,
            project.estimated_hours,
        );
        ui.label(RichText::new(summary).size(11.0).color(theme::TEXT_SECONDARY));
    });
    ui.add_space(6.0);

    // Details editor
    egui::CollapsingHeader::new(RichText::new("Details").strong())
        .default_open(true)
        .show(ui, |ui| {
            if let Some(form) = app.project_form.as_mut().filter(|f| f.id == project_id) {
                match project_editor::show_project_editor(form, &app.config, ui) {
                    EditorAction::Save => action = Some(Action::SaveProject),
                    EditorAction::Revert => action = Some(Action::RevertProject),
                    EditorAction::Delete => action = Some(Action::RequestDelete(project_id.clone())),
                    EditorAction::None => {}
                }
            }
        });

    // Milestones
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        widgets::section_header(ui, &format!(
            "Milestones ({}/{})",
            project.completed_subtasks(),
            project.subtasks.len()
        ));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button(format!("{} Add Milestone", egui_phosphor::regular::PLUS)).clicked() {
                action = Some(Action::NewSubtask(project_id.clone()));
            }
        });
    });

    if let Some(draft) = app.subtask_draft.as_mut().filter(|d| d.project_id == project_id) {
        let owners = project_editor::owner_choices(&app.config, &draft.form.owner);
        match subtask_editor::show_subtask_editor(&mut draft.form, &owners, ui) {
            SubtaskEditorAction::Save => action = Some(Action::SaveSubtask),
            SubtaskEditorAction::Cancel => action = Some(Action::CancelSubtask),
            SubtaskEditorAction::None => {}
        }
        ui.add_space(6.0);
    }

    if project.subtasks.is_empty() {
        ui.label(RichText::new("No milestones yet. Completion is set by hand until one is added.").color(theme::TEXT_DIM));
    }
    let last = project.subtasks.len().saturating_sub(1);
    for (idx, subtask) in project.subtasks.iter().enumerate() {
        widgets::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                let mut done = subtask.completed;
                if ui.checkbox(&mut done, "").changed() {
                    action = Some(Action::ToggleSubtask {
                        project_id: project_id.clone(),
                        subtask_id: subtask.id.clone(),
                        completed: done,
                    });
                }
                let name = RichText::new(&subtask.name).size(12.5);
                ui.label(if subtask.completed { name.strikethrough().color(theme::TEXT_DIM) } else { name });
                widgets::status_badge(ui, subtask.display_status(today));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if widgets::remove_button(ui, "Remove milestone") {
                        action = Some(Action::RemoveSubtask {
                            project_id: project_id.clone(),
                            subtask_id: subtask.id.clone(),
                        });
                    }
                    if ui.small_button("Edit").clicked() {
                        action = Some(Action::EditSubtask {
                            project_id: project_id.clone(),
                            subtask_id: subtask.id.clone(),
                        });
                    }
                    if idx < last && ui.small_button("Down").on_hover_text("Move down").clicked() {
                        action = Some(Action::MoveSubtask { project_id: project_id.clone(), from: idx, to: idx + 1 });
                    }
                    if idx > 0 && ui.small_button("Up").on_hover_text("Move up").clicked() {
                        action = Some(Action::MoveSubtask { project_id: project_id.clone(), from: idx, to: idx - 1 });
                    }
                });
            });

            let owner = if subtask.owner.trim().is_empty() { owner_label(project) } else { subtask.owner.as_str() };
            let dates = match (subtask.start(), subtask.due()) {
                (Some(s), Some(d)) => format!(
                    "{} {} {}",
                    s.format("%b %d"),
                    egui_phosphor::regular::ARROW_RIGHT,
                    d.format("%b %d")
                ),
                (None, Some(d)) => format!("due {}", d.format("%b %d")),
                _ => "no dates".to_string(),
            };
            ui.label(RichText::new(format!("{}  ·  {}", owner, dates)).size(10.5).color(theme::TEXT_SECONDARY));
            if !subtask.completion_criteria.is_empty() {
                ui.label(
                    RichText::new(format!("Done when: {}", subtask.completion_criteria))
                        .size(10.5)
                        .color(theme::TEXT_DIM),
                );
            }
            if !subtask.success_metric.is_empty() {
                ui.label(
                    RichText::new(format!("Metric: {}", subtask.success_metric))
                        .size(10.5)
                        .color(theme::TEXT_DIM),
                );
            }
        });
        ui.add_space(3.0);
    }

    // Notes
    ui.add_space(6.0);
    widgets::section_header(ui, &format!("Notes ({})", project.notes.len()));
    if let Some(a) = notes::show_notes(project, &mut app.note_draft, ui) {
        action = Some(a);
    }

    action
}

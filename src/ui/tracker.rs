use egui::{RichText, Ui};

use crate::app::{Action, TrackerApp};
use crate::dashboard::owner_label;
use crate::ui::{theme, widgets};

/// Per-objective milestone checklists.
pub fn show_tracker(app: &TrackerApp, ui: &mut Ui) -> Action {
    let mut action = Action::None;
    let today = app.today;

    ui.heading(RichText::new("Completion Tracker").strong());
    ui.label(
        RichText::new("Tick milestones as they finish; objective completion follows.")
            .size(11.0)
            .color(theme::TEXT_SECONDARY),
    );
    ui.add_space(6.0);

    let visible = app.filter.apply(&app.projects, today);
    if visible.is_empty() {
        ui.label(RichText::new("No objectives match the filter").color(theme::TEXT_DIM));
        return action;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for project in visible {
                ui.push_id(&project.id, |ui| {
                    widgets::card_frame().show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            if ui.link(RichText::new(project.short_label(60)).strong().size(13.0)).clicked() {
                                action = Action::OpenProject(project.id.clone());
                            }
                            widgets::status_badge(ui, project.display_status(today));
                            ui.label(RichText::new(owner_label(project)).size(10.5).color(theme::TEXT_SECONDARY));
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                widgets::progress_bar(ui, project.completion_percentage, 160.0);
                                ui.label(
                                    RichText::new(format!(
                                        "{}/{}",
                                        project.completed_subtasks(),
                                        project.subtasks.len()
                                    ))
                                    .size(11.0)
                                    .color(theme::TEXT_DIM),
                                );
                            });
                        });

                        egui::CollapsingHeader::new("Milestones")
                            .default_open(!project.subtasks.is_empty())
                            .show(ui, |ui| {
                                if project.subtasks.is_empty() {
                                    ui.label(RichText::new("No milestones").color(theme::TEXT_DIM));
                                }
                                for subtask in &project.subtasks {
                                    ui.horizontal(|ui| {
                                        let mut done = subtask.completed;
                                        if ui.checkbox(&mut done, subtask.name.as_str()).changed() {
                                            action = Action::ToggleSubtask {
                                                project_id: project.id.clone(),
                                                subtask_id: subtask.id.clone(),
                                                completed: done,
                                            };
                                        }
                                        if let Some(due) = subtask.due() {
                                            let color = if subtask.is_overdue(today) {
                                                theme::RED
                                            } else {
                                                theme::TEXT_DIM
                                            };
                                            ui.label(
                                                RichText::new(format!("due {}", due.format("%b %d")))
                                                    .size(10.5)
                                                    .color(color),
                                            );
                                        }
                                    });
                                }
                            });
                    });
                });
                ui.add_space(4.0);
            }
        });

    action
}

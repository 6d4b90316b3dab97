use egui::{RichText, Ui};

use crate::app::Action;
use crate::model::date::value_of;
use crate::model::Project;
use crate::ui::{theme, widgets};

/// Note composer followed by the project's notes, newest first.
pub fn show_notes(project: &Project, draft: &mut String, ui: &mut Ui) -> Option<Action> {
    let mut action = None;

    ui.horizontal(|ui| {
        let edit = ui.add(
            egui::TextEdit::singleline(draft)
                .hint_text("Add a note...")
                .desired_width((ui.available_width() - 90.0).max(120.0)),
        );
        let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (widgets::primary_button(ui, "Add Note").clicked() || submitted) && !draft.trim().is_empty() {
            action = Some(Action::AddNote(project.id.clone()));
        }
    });
    ui.add_space(4.0);

    if project.notes.is_empty() {
        ui.label(RichText::new("No notes yet").color(theme::TEXT_DIM));
        return action;
    }

    for (index, note) in project.notes_newest_first() {
        egui::Frame::none()
            .fill(theme::BG_CARD)
            .rounding(egui::Rounding::same(4.0))
            .inner_margin(egui::Margin::symmetric(10.0, 6.0))
            .stroke(egui::Stroke::new(1.0, theme::BORDER_SUBTLE))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    let stamp = value_of(&note.timestamp)
                        .map(|t| t.format("%b %d, %Y %H:%M").to_string())
                        .unwrap_or_else(|| "undated".to_string());
                    ui.label(RichText::new(stamp).size(10.0).color(theme::TEXT_DIM));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if widgets::remove_button(ui, "Delete note") {
                            action = Some(Action::RemoveNote {
                                project_id: project.id.clone(),
                                index,
                            });
                        }
                    });
                });
                ui.label(&note.text);
            });
        ui.add_space(2.0);
    }

    action
}

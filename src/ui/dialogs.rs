use crate::app::TrackerApp;
use crate::ui::project_editor::{self, labelled_combo, owner_combo};
use crate::ui::{theme, widgets};
use egui::{Color32, Context, RichText, Ui, Window};

const DIALOG_WIDTH: f32 = 380.0;

/// Banner shown above the page while the last save did not reach disk.
pub fn show_save_warning(app: &mut TrackerApp, ui: &mut Ui) {
    egui::Frame::none()
        .fill(theme::WARNING_BG)
        .rounding(egui::Rounding::same(4.0))
        .inner_margin(egui::Margin::symmetric(10.0, 6.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!(
                        "Changes are only in memory. Saving to {} failed.",
                        app.store.path().display()
                    ))
                    .color(Color32::WHITE),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Dismiss").clicked() {
                        app.save_failed = false;
                    }
                    if ui.button("Retry").clicked() {
                        app.retry_save();
                    }
                });
            });
        });
    ui.add_space(8.0);
}

/// Render the "New Objective" dialog.
pub fn show_add_project_dialog(app: &mut TrackerApp, ctx: &Context) {
    let mut should_close = false;
    let mut create = false;
    let owners = project_editor::owner_choices(&app.config, &app.new_project.owner);

    Window::new(RichText::new("New Objective").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            // Force dark backgrounds inside this dialog
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.visuals_mut().faint_bg_color = Color32::TRANSPARENT;
            ui.visuals_mut().striped = false;

            ui.add_space(4.0);
            let form = &mut app.new_project;
            egui::Grid::new("add_project_grid")
                .num_columns(2)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Name").color(theme::TEXT_SECONDARY));
                    let name = ui.add_sized(
                        [240.0, 24.0],
                        egui::TextEdit::singleline(&mut form.name)
                            .hint_text("Objective name...")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    if name.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        create = true;
                    }
                    ui.end_row();

                    ui.label(RichText::new("Description").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [240.0, 48.0],
                        egui::TextEdit::multiline(&mut form.description).desired_rows(2),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Owner").color(theme::TEXT_SECONDARY));
                    owner_combo(ui, "dlg_owner", &mut form.owner, &owners);
                    ui.end_row();

                    ui.label(RichText::new("Priority").color(theme::TEXT_SECONDARY));
                    labelled_combo(ui, "dlg_priority", &mut form.priority);
                    ui.end_row();

                    ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                    ui.add(egui_extras::DatePickerButton::new(&mut form.start).id_salt("dlg_dp_start"));
                    ui.end_row();

                    ui.label(RichText::new("Due").color(theme::TEXT_SECONDARY));
                    ui.add(egui_extras::DatePickerButton::new(&mut form.due).id_salt("dlg_dp_due"));
                    ui.end_row();
                });

            let valid = !form.name.trim().is_empty() && form.due >= form.start;
            if form.due < form.start {
                ui.label(RichText::new("Due date is before the start date").size(11.0).color(theme::RED));
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let create_btn = ui.add_enabled_ui(valid, |ui| {
                    ui.add_sized(
                        [80.0, 28.0],
                        egui::Button::new(RichText::new("Create").color(Color32::WHITE))
                            .fill(theme::ACCENT)
                            .rounding(egui::Rounding::same(4.0)),
                    )
                });
                if create_btn.inner.clicked() {
                    create = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
            if !valid {
                create = false;
            }
        });

    if create {
        app.add_project();
        should_close = true;
    }
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_project = false;
    }
}

pub fn show_confirm_delete_dialog(app: &mut TrackerApp, ctx: &Context) {
    let Some(id) = app.confirm_delete.clone() else {
        return;
    };
    let label = crate::io::find_by_id(&app.projects, &id)
        .map(|p| p.short_label(50))
        .unwrap_or_else(|| id.clone());
    let mut confirmed = false;
    let mut cancelled = false;

    Window::new(RichText::new("Delete Objective").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(format!("Delete '{}'?", label));
            ui.label(
                RichText::new("Its milestones and notes are removed too. This cannot be undone.")
                    .size(11.0)
                    .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let delete_btn = egui::Button::new(RichText::new("Delete").color(Color32::WHITE))
                    .fill(theme::RED)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], delete_btn).clicked() {
                    confirmed = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    cancelled = true;
                }
            });
            ui.add_space(2.0);
        });

    if confirmed {
        app.confirm_delete = None;
        app.delete_project(&id);
    } else if cancelled || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.confirm_delete = None;
    }
}

pub fn show_confirm_import_dialog(app: &mut TrackerApp, ctx: &Context) {
    let Some((path, imported)) = app.pending_import.as_ref() else {
        return;
    };
    let summary = format!(
        "{} contains {} objectives.",
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        imported.len()
    );
    let current = app.projects.len();
    let mut confirmed = false;
    let mut cancelled = false;

    Window::new(RichText::new("Import Objectives").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(summary);
            ui.label(
                RichText::new(format!("Importing replaces the {} objectives currently stored.", current))
                    .size(11.0)
                    .color(theme::YELLOW),
            );
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if widgets::primary_button(ui, "Replace").clicked() {
                    confirmed = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    cancelled = true;
                }
            });
            ui.add_space(2.0);
        });

    if confirmed {
        app.confirm_import();
    } else if cancelled || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.pending_import = None;
        app.status_message = "Import cancelled".to_string();
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut TrackerApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Objective Tracker").strong());
                ui.add_space(2.0);
                ui.label(RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION"))).color(theme::TEXT_SECONDARY));
                ui.add_space(10.0);
                ui.label("Quarterly supply-chain objectives,");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

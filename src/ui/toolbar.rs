use crate::app::{Page, TrackerApp};
use crate::model::TimelineScale;
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top menu bar.
pub fn show_toolbar(app: &mut TrackerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Objective...").clicked() {
                app.show_add_project = true;
                ui.close_menu();
            }
            if ui.button("  Save Objective    Ctrl+S").clicked() {
                app.save_project_form();
                ui.close_menu();
            }
            if ui.button("  Reload from Disk").clicked() {
                app.reload();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import JSON...").clicked() {
                app.import_json();
                ui.close_menu();
            }
            if ui.button("  Export JSON...").clicked() {
                app.export_json();
                ui.close_menu();
            }
            if ui.button("  Export Schedule CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Data Folder").clicked() {
                app.open_data_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            for page in Page::ALL {
                if ui.radio_value(&mut app.page, page, page.label()).clicked() {
                    ui.close_menu();
                }
            }
            ui.separator();
            ui.label(RichText::new("Timeline Scale").small().weak());
            for (scale, label) in [
                (TimelineScale::Days, "Days"),
                (TimelineScale::Weeks, "Weeks"),
                (TimelineScale::Months, "Months"),
            ] {
                if ui.radio_value(&mut app.viewport.scale, scale, label).clicked() {
                    ui.close_menu();
                }
            }
            ui.checkbox(&mut app.show_subtasks, "Show milestones on timeline");
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let unsaved = if app.unsaved { " (unsaved)" } else { "" };
            ui.label(
                RichText::new(format!("{}{}", app.config.quarter.label, unsaved))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}

use egui::{RichText, Ui};

use crate::app::{Action, TrackerApp};
use crate::config::{default_config_path, DATA_DIR_ENV};
use crate::ui::{theme, widgets};

pub fn show_settings(app: &TrackerApp, ui: &mut Ui) -> Action {
    let mut action = Action::None;

    ui.heading(RichText::new("Settings").strong());
    ui.add_space(6.0);

    widgets::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        widgets::section_header(ui, "Data");
        egui::Grid::new("data_paths")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                widgets::field_label(ui, "PROJECT FILE");
                ui.label(RichText::new(app.store.path().display().to_string()).monospace().size(11.0));
                ui.end_row();

                widgets::field_label(ui, "CONFIG FILE");
                let config = default_config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "unavailable".to_string());
                ui.label(RichText::new(config).monospace().size(11.0));
                ui.end_row();

                widgets::field_label(ui, "QUARTER");
                ui.label(format!(
                    "{}  ({} to {})",
                    app.config.quarter.label,
                    app.config.quarter.start.format("%b %d, %Y"),
                    app.config.quarter.end.format("%b %d, %Y")
                ));
                ui.end_row();
            });
        ui.label(
            RichText::new(format!("Set {} to use a different data directory.", DATA_DIR_ENV))
                .size(10.5)
                .color(theme::TEXT_DIM),
        );
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("Reload from Disk").clicked() {
                action = Action::Reload;
            }
            if ui.button("Open Data Folder").clicked() {
                action = Action::OpenDataFolder;
            }
        });
    });

    ui.add_space(8.0);
    widgets::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        widgets::section_header(ui, "Import / Export");
        ui.label(
            RichText::new("Export writes every objective to a JSON file in the same format as the project file.")
                .size(11.0)
                .color(theme::TEXT_SECONDARY),
        );
        ui.horizontal(|ui| {
            if widgets::primary_button(ui, "Export JSON...").clicked() {
                action = Action::ExportJson;
            }
            if ui.button("Export Schedule CSV...").clicked() {
                action = Action::ExportCsv;
            }
        });
        ui.add_space(6.0);
        ui.label(
            RichText::new("Importing replaces all current objectives with the file's contents.")
                .size(11.0)
                .color(theme::YELLOW),
        );
        if ui.button("Import JSON...").clicked() {
            action = Action::Import;
        }
    });

    ui.add_space(8.0);
    widgets::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        widgets::section_header(ui, "About");
        ui.label(format!("Objective Tracker {}", env!("CARGO_PKG_VERSION")));
        if ui.button("About...").clicked() {
            action = Action::About;
        }
    });

    action
}

use egui::{Color32, RichText, Ui};

use crate::app::{Page, TrackerApp};
use crate::dashboard::{owners, Metrics};
use crate::model::{DisplayStatus, Labelled, Priority};
use crate::ui::{theme, widgets};

/// Navigation, quick stats and the project filter.
pub fn show_sidebar(app: &mut TrackerApp, ui: &mut Ui) {
    ui.add_space(4.0);
    egui::Frame::none()
        .fill(theme::BRAND)
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("Objective Tracker").strong().size(15.0).color(Color32::WHITE));
            ui.label(
                RichText::new(format!("{} supply chain objectives", app.config.quarter.label))
                    .size(10.5)
                    .color(theme::TEXT_SECONDARY),
            );
        });
    ui.add_space(8.0);

    for page in Page::ALL {
        let selected = app.page == page;
        let text = RichText::new(page.label()).size(13.0).color(if selected {
            Color32::WHITE
        } else {
            theme::TEXT_SECONDARY
        });
        let btn = egui::Button::new(text)
            .fill(if selected { theme::BRAND_LIGHT } else { Color32::TRANSPARENT })
            .rounding(egui::Rounding::same(4.0));
        if ui.add_sized([ui.available_width(), 28.0], btn).clicked() {
            app.page = page;
        }
    }

    ui.add_space(8.0);
    ui.separator();
    widgets::section_header(ui, "Quick Stats");

    let metrics = Metrics::compute(&app.projects, &app.config.quarter, app.today);
    egui::Grid::new("quick_stats")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            stat_row(ui, "Objectives", metrics.total_projects.to_string());
            stat_row(ui, "Completed", metrics.completed.to_string());
            stat_row(ui, "In progress", metrics.in_progress.to_string());
            stat_row(ui, "Overdue", metrics.overdue.to_string());
            stat_row(ui, "Avg. completion", format!("{:.0}%", metrics.average_completion));
            let days = metrics
                .days_left_in_quarter
                .map_or_else(|| "ended".to_string(), |d| d.to_string());
            stat_row(ui, "Days left", days);
        });

    ui.add_space(8.0);
    ui.separator();
    widgets::section_header(ui, "Filters");

    let owner_options = owners(&app.projects);
    let filter = &mut app.filter;

    widgets::field_label(ui, "OWNER");
    egui::ComboBox::from_id_salt("filter_owner")
        .selected_text(filter.owner.as_deref().unwrap_or("All"))
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut filter.owner, None, "All");
            for owner in owner_options {
                let label = owner.clone();
                ui.selectable_value(&mut filter.owner, Some(owner), label);
            }
        });

    widgets::field_label(ui, "STATUS");
    egui::ComboBox::from_id_salt("filter_status")
        .selected_text(filter.status.map_or("All", DisplayStatus::label))
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut filter.status, None, "All");
            for status in DisplayStatus::ALL {
                ui.selectable_value(&mut filter.status, Some(*status), status.label());
            }
        });

    widgets::field_label(ui, "PRIORITY");
    egui::ComboBox::from_id_salt("filter_priority")
        .selected_text(filter.priority.map_or("All", Priority::label))
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut filter.priority, None, "All");
            for priority in Priority::ALL {
                ui.selectable_value(&mut filter.priority, Some(*priority), priority.label());
            }
        });

    if !filter.is_empty() {
        ui.add_space(4.0);
        if ui.small_button("Clear filters").clicked() {
            *filter = Default::default();
        }
    }

    ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
        ui.add_space(4.0);
        let add = egui::Button::new(
            RichText::new(format!("{}  New Objective", egui_phosphor::regular::PLUS))
                .color(Color32::WHITE)
                .size(12.0),
        )
        .fill(theme::ACCENT)
        .rounding(egui::Rounding::same(5.0));
        if ui.add_sized([ui.available_width(), 30.0], add).clicked() {
            app.show_add_project = true;
        }
    });
}

fn stat_row(ui: &mut Ui, label: &str, value: String) {
    ui.label(RichText::new(label).size(11.0).color(theme::TEXT_SECONDARY));
    ui.label(RichText::new(value).size(12.0).strong());
    ui.end_row();
}

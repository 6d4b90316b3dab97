use egui::{Color32, RichText, Ui};

use crate::dashboard::ProgressBand;
use crate::model::{DisplayStatus, Labelled, Priority};
use crate::ui::theme;

/// Small rounded pill with `text` on `fill`.
pub fn pill(ui: &mut Ui, text: &str, fill: Color32) -> egui::Response {
    egui::Frame::none()
        .fill(fill)
        .rounding(egui::Rounding::same(9.0))
        .inner_margin(egui::Margin::symmetric(8.0, 1.0))
        .show(ui, |ui| {
            ui.label(RichText::new(text).size(10.5).color(theme::text_on(fill)).strong());
        })
        .response
}

pub fn status_badge(ui: &mut Ui, status: DisplayStatus) -> egui::Response {
    pill(ui, status.label(), theme::status_color(status))
}

pub fn priority_badge(ui: &mut Ui, priority: Priority) -> egui::Response {
    pill(ui, priority.label(), theme::priority_color(priority))
}

/// Progress bar coloured by band, with the percentage written on it.
pub fn progress_bar(ui: &mut Ui, percentage: u8, width: f32) -> egui::Response {
    let fill = theme::band_color(ProgressBand::for_percentage(percentage));
    ui.add(
        egui::ProgressBar::new(f32::from(percentage.min(100)) / 100.0)
            .desired_width(width)
            .fill(fill)
            .rounding(egui::Rounding::same(3.0))
            .text(RichText::new(format!("{}%", percentage)).size(10.0)),
    )
}

pub fn section_header(ui: &mut Ui, text: &str) {
    ui.add_space(6.0);
    ui.label(RichText::new(text).strong().size(14.0).color(theme::TEXT_PRIMARY));
    ui.add_space(4.0);
}

/// Upper-case caption above an input.
pub fn field_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(10.0).color(theme::TEXT_DIM).strong());
}

pub fn card_frame() -> egui::Frame {
    egui::Frame::none()
        .fill(theme::BG_CARD)
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(egui::Margin::same(10.0))
        .stroke(egui::Stroke::new(1.0, theme::BORDER_SUBTLE))
}

/// Accent-filled button.
pub fn primary_button(ui: &mut Ui, text: &str) -> egui::Response {
    let btn = egui::Button::new(RichText::new(text).color(Color32::WHITE).size(12.0))
        .fill(theme::ACCENT)
        .rounding(egui::Rounding::same(4.0));
    ui.add(btn)
}

/// Frameless dim `X` button used to remove list entries.
pub fn remove_button(ui: &mut Ui, hover: &str) -> bool {
    ui.add(
        egui::Button::new(
            RichText::new(egui_phosphor::regular::X)
                .size(11.0)
                .color(theme::TEXT_DIM),
        )
        .frame(false),
    )
    .on_hover_text(hover)
    .clicked()
}

/// A labelled metric card: small caption over a large value, optional hint.
pub fn metric_card(ui: &mut Ui, caption: &str, value: &str, hint: Option<&str>, width: f32) {
    card_frame().show(ui, |ui| {
        ui.set_width(width);
        ui.label(RichText::new(caption).size(10.5).color(theme::TEXT_SECONDARY));
        ui.label(RichText::new(value).size(22.0).strong().color(theme::TEXT_PRIMARY));
        if let Some(hint) = hint {
            ui.label(RichText::new(hint).size(10.0).color(theme::TEXT_DIM));
        }
    });
}

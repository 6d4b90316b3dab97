//! Small painter-drawn charts for the dashboard.

use egui::{Align2, Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use crate::ui::theme;

/// One horizontal bar.
pub struct Bar {
    pub label: String,
    pub value: f32,
    pub color: Color32,
    /// Text drawn after the bar.
    pub caption: String,
    pub tooltip: Option<String>,
}

const BAR_ROW: f32 = 22.0;

/// Horizontal bars scaled against `max`; the label column is `label_width` wide.
pub fn horizontal_bars(ui: &mut Ui, bars: &[Bar], max: f32, label_width: f32) {
    if bars.is_empty() {
        ui.label(egui::RichText::new("No data yet").color(theme::TEXT_DIM));
        return;
    }
    let width = ui.available_width();
    let (response, painter) =
        ui.allocate_painter(Vec2::new(width, bars.len() as f32 * BAR_ROW), Sense::hover());
    let origin = response.rect.min;
    let track = (width - label_width - 60.0).max(40.0);
    let max = if max > 0.0 { max } else { 1.0 };

    for (i, bar) in bars.iter().enumerate() {
        let y = origin.y + i as f32 * BAR_ROW;
        let label_clip = Rect::from_min_size(Pos2::new(origin.x, y), Vec2::new(label_width - 6.0, BAR_ROW));
        painter.with_clip_rect(label_clip).text(
            Pos2::new(origin.x, y + BAR_ROW / 2.0),
            Align2::LEFT_CENTER,
            &bar.label,
            theme::font_sub(),
            theme::TEXT_SECONDARY,
        );

        let x0 = origin.x + label_width;
        let track_rect = Rect::from_min_size(Pos2::new(x0, y + 5.0), Vec2::new(track, BAR_ROW - 10.0));
        painter.rect_filled(track_rect, Rounding::same(3.0), theme::GRID_LINE);
        let filled = track * (bar.value / max).clamp(0.0, 1.0);
        if filled > 0.0 {
            painter.rect_filled(
                Rect::from_min_size(track_rect.min, Vec2::new(filled.max(3.0), track_rect.height())),
                Rounding::same(3.0),
                bar.color,
            );
        }
        painter.text(
            Pos2::new(x0 + track + 6.0, y + BAR_ROW / 2.0),
            Align2::LEFT_CENTER,
            &bar.caption,
            theme::font_small(),
            theme::TEXT_PRIMARY,
        );
    }

    if let Some(pos) = response.hover_pos() {
        let idx = ((pos.y - origin.y) / BAR_ROW) as usize;
        if let Some(tip) = bars.get(idx).and_then(|b| b.tooltip.as_deref()) {
            response.on_hover_text_at_pointer(tip);
        }
    }
}

/// Two bars per row (budget behind, spend in front), red when spend exceeds budget.
pub fn paired_bars(ui: &mut Ui, rows: &[(String, u64, u64)], label_width: f32) {
    if rows.is_empty() {
        ui.label(egui::RichText::new("No data yet").color(theme::TEXT_DIM));
        return;
    }
    let max = rows
        .iter()
        .map(|(_, budget, spent)| (*budget).max(*spent))
        .max()
        .unwrap_or(1)
        .max(1) as f32;
    let width = ui.available_width();
    let (response, painter) =
        ui.allocate_painter(Vec2::new(width, rows.len() as f32 * BAR_ROW), Sense::hover());
    let origin = response.rect.min;
    let track = (width - label_width - 10.0).max(40.0);

    for (i, (label, budget, spent)) in rows.iter().enumerate() {
        let y = origin.y + i as f32 * BAR_ROW;
        painter.text(
            Pos2::new(origin.x, y + BAR_ROW / 2.0),
            Align2::LEFT_CENTER,
            label,
            theme::font_sub(),
            theme::TEXT_SECONDARY,
        );
        let x0 = origin.x + label_width;
        let budget_w = track * (*budget as f32 / max);
        let spent_w = track * (*spent as f32 / max);
        painter.rect_filled(
            Rect::from_min_size(Pos2::new(x0, y + 3.0), Vec2::new(budget_w, BAR_ROW - 6.0)),
            Rounding::same(3.0),
            theme::BRAND_LIGHT,
        );
        let spent_color = if spent > budget { theme::RED } else { theme::ACCENT };
        painter.rect_filled(
            Rect::from_min_size(Pos2::new(x0, y + 7.0), Vec2::new(spent_w, BAR_ROW - 14.0)),
            Rounding::same(2.0),
            spent_color,
        );
    }
}

/// Ring showing `fraction` complete with `center_text` in the middle.
pub fn ring(ui: &mut Ui, fraction: f32, size: f32, color: Color32, center_text: &str) {
    let (response, painter) = ui.allocate_painter(Vec2::splat(size), Sense::hover());
    let center = response.rect.center();
    let radius = size / 2.0 - 6.0;
    painter.circle_stroke(center, radius, Stroke::new(8.0, theme::GRID_LINE));

    let fraction = fraction.clamp(0.0, 1.0);
    if fraction > 0.0 {
        let steps = (64.0 * fraction).ceil().max(2.0) as usize;
        let start = -std::f32::consts::FRAC_PI_2;
        let points: Vec<Pos2> = (0..=steps)
            .map(|i| {
                let angle = start + std::f32::consts::TAU * fraction * i as f32 / steps as f32;
                center + radius * Vec2::angled(angle)
            })
            .collect();
        painter.add(egui::Shape::line(points, Stroke::new(8.0, color)));
    }
    painter.text(
        center,
        Align2::CENTER_CENTER,
        center_text,
        egui::FontId::proportional(18.0),
        theme::TEXT_PRIMARY,
    );
}

/// Legend swatch followed by a label.
pub fn legend_item(ui: &mut Ui, color: Color32, label: &str) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(10.0), Sense::hover());
        ui.painter().rect_filled(rect, Rounding::same(2.0), color);
        ui.label(egui::RichText::new(label).size(11.0).color(theme::TEXT_SECONDARY));
    });
}

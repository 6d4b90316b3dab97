use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::dashboard::{ProgressBand, Urgency};
use crate::model::{DisplayStatus, Priority};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(34, 37, 48);
pub const BG_CARD: Color32 = Color32::from_rgb(36, 38, 50);
pub const BG_FIELD: Color32 = Color32::from_rgb(20, 20, 28);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 45);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(90, 140, 220);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(255, 255, 255);

pub const ACCENT: Color32 = Color32::from_rgb(74, 144, 217);
pub const BRAND: Color32 = Color32::from_rgb(30, 58, 95);
pub const BRAND_LIGHT: Color32 = Color32::from_rgb(43, 84, 126);
pub const TODAY_LINE: Color32 = Color32::from_rgb(240, 75, 75);
pub const GRID_LINE: Color32 = Color32::from_rgb(44, 46, 58);
pub const PROGRESS_OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 55);

// Bootstrap-style semantic colours shared by badges, bars and charts.
pub const GRAY: Color32 = Color32::from_rgb(0x6c, 0x75, 0x7d);
pub const BLUE: Color32 = Color32::from_rgb(0x0d, 0x6e, 0xfd);
pub const GREEN: Color32 = Color32::from_rgb(0x19, 0x87, 0x54);
pub const RED: Color32 = Color32::from_rgb(0xdc, 0x35, 0x45);
pub const YELLOW: Color32 = Color32::from_rgb(0xff, 0xc1, 0x07);

pub const WARNING_BG: Color32 = Color32::from_rgb(90, 32, 36);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const ROW_HEIGHT: f32 = 28.0;
pub const ROW_GAP: f32 = 2.0;
pub const HEADER_HEIGHT: f32 = 44.0;
pub const LABEL_WIDTH: f32 = 240.0;
pub const BAR_ROUNDING: f32 = 5.0;
pub const BAR_INSET: f32 = 4.0;
pub const SIDE_PANEL_WIDTH: f32 = 240.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

// ── Semantic colours ─────────────────────────────────────────────────────────

pub fn status_color(status: DisplayStatus) -> Color32 {
    match status {
        DisplayStatus::NotStarted => GRAY,
        DisplayStatus::InProgress => BLUE,
        DisplayStatus::Completed => GREEN,
        DisplayStatus::Overdue => RED,
        DisplayStatus::OnHold => YELLOW,
    }
}

pub fn priority_color(priority: Priority) -> Color32 {
    match priority {
        Priority::High => RED,
        Priority::Medium => YELLOW,
        Priority::Low => GREEN,
    }
}

pub fn band_color(band: ProgressBand) -> Color32 {
    match band {
        ProgressBand::Good => GREEN,
        ProgressBand::Warning => YELLOW,
        ProgressBand::Critical => RED,
        ProgressBand::Idle => GRAY,
    }
}

pub fn urgency_color(urgency: Urgency) -> Color32 {
    match urgency {
        Urgency::Overdue => RED,
        Urgency::DueSoon => YELLOW,
        Urgency::OnTrack => GREEN,
    }
}

/// Dark text on yellow, white on everything else.
pub fn text_on(fill: Color32) -> Color32 {
    if fill == YELLOW {
        Color32::from_rgb(33, 37, 41)
    } else {
        TEXT_ON_BAR
    }
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_FIELD;

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(42, 44, 56);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(52, 54, 68);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_fill = Color32::from_rgb(60, 62, 76);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.widgets.open.bg_fill = Color32::from_rgb(50, 52, 66);
    visuals.widgets.open.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.open.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.open.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);

    visuals.striped = false;
    visuals.faint_bg_color = BG_PANEL;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}

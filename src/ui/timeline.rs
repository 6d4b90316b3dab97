use chrono::{Datelike, NaiveDate};
use egui::{Color32, Pos2, Rect, RichText, Rounding, Sense, Stroke, Ui, Vec2};

use crate::app::{Action, TrackerApp};
use crate::dashboard::gantt::date_span;
use crate::dashboard::{gantt_rows, GanttRow};
use crate::model::{DisplayStatus, TimelineScale, TimelineViewport};
use crate::ui::charts::legend_item;
use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_PADDING: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const LABEL_WIDTH: f32 = theme::LABEL_WIDTH;

/// Render the objective timeline: controls, legend and the painted chart.
pub fn show_timeline(app: &mut TrackerApp, ui: &mut Ui) -> Action {
    let rows = gantt_rows(&app.projects, &app.filter, app.show_subtasks, app.today);
    let grid_width = (ui.available_width() - LABEL_WIDTH).max(400.0);

    ui.horizontal(|ui| {
        ui.heading(RichText::new("Timeline").strong());
        ui.add_space(12.0);
        ui.checkbox(&mut app.show_subtasks, "Show milestones");
        ui.separator();
        for (scale, label) in [
            (TimelineScale::Days, "Days"),
            (TimelineScale::Weeks, "Weeks"),
            (TimelineScale::Months, "Months"),
        ] {
            ui.selectable_value(&mut app.viewport.scale, scale, label);
        }
        ui.separator();
        if ui.button("−").on_hover_text("Zoom out").clicked() {
            app.viewport.zoom_out();
        }
        if ui.button("+").on_hover_text("Zoom in").clicked() {
            app.viewport.zoom_in();
        }
        if ui.button("Quarter").on_hover_text("Fit the quarter").clicked() {
            app.viewport = TimelineViewport::around(app.config.quarter.start, app.config.quarter.end);
            app.viewport.fit_width(grid_width);
        }
        if ui.button("All").on_hover_text("Fit every objective").clicked() {
            if let Some((start, end)) = date_span(&rows) {
                let scale = app.viewport.scale;
                app.viewport = TimelineViewport::around(start, end);
                app.viewport.scale = scale;
            }
        }
    });
    ui.horizontal(|ui| {
        for status in DisplayStatus::ALL {
            legend_item(ui, theme::status_color(*status), status.label());
        }
    });
    ui.add_space(4.0);

    if rows.is_empty() {
        ui.label(
            RichText::new("No objectives with both a start and a due date match the filter")
                .color(theme::TEXT_DIM),
        );
        return Action::None;
    }

    show_gantt_chart(&rows, &mut app.viewport, app.today, ui)
}

/// Painted Gantt chart; clicking a bar opens its objective.
fn show_gantt_chart(rows: &[GanttRow], viewport: &mut TimelineViewport, today: NaiveDate, ui: &mut Ui) -> Action {
    let mut action = Action::None;
    let available = ui.available_size();
    let chart_width = LABEL_WIDTH + viewport.total_width().max(available.x - LABEL_WIDTH);
    let chart_height = HEADER_HEIGHT + rows.len() as f32 * (ROW_HEIGHT + ROW_PADDING) + 20.0;

    // Handle zoom with scroll wheel
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        if scroll_delta.y > 0.0 {
            viewport.zoom_in();
        } else if scroll_delta.y < 0.0 {
            viewport.zoom_out();
        }
    }

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::hover(),
            );
            let origin = response.rect.min;
            let grid_origin = Pos2::new(origin.x + LABEL_WIDTH, origin.y);

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_timeline_header(&painter, grid_origin, viewport, chart_width - LABEL_WIDTH, chart_height);

            for (i, row) in rows.iter().enumerate() {
                let y = origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING);
                let row_bg = if i % 2 == 0 { theme::BG_PANEL } else { theme::BG_DARK };
                painter.rect_filled(
                    Rect::from_min_size(Pos2::new(origin.x, y), Vec2::new(chart_width, ROW_HEIGHT + ROW_PADDING)),
                    0.0,
                    row_bg,
                );
                painter.line_segment(
                    [
                        Pos2::new(origin.x, y + ROW_HEIGHT + ROW_PADDING),
                        Pos2::new(origin.x + chart_width, y + ROW_HEIGHT + ROW_PADDING),
                    ],
                    Stroke::new(0.5, theme::BORDER_SUBTLE),
                );

                let label_rect = Rect::from_min_size(Pos2::new(origin.x, y), Vec2::new(LABEL_WIDTH - 8.0, ROW_HEIGHT));
                painter.with_clip_rect(label_rect).text(
                    Pos2::new(origin.x + 8.0, y + ROW_HEIGHT / 2.0),
                    egui::Align2::LEFT_CENTER,
                    &row.label,
                    theme::font_bar(),
                    if row.is_subtask() { theme::TEXT_SECONDARY } else { theme::TEXT_PRIMARY },
                );

                let bar_rect = draw_bar(&painter, grid_origin, viewport, row, y + ROW_PADDING);
                let bar_response = ui.interact(
                    bar_rect,
                    ui.make_persistent_id(("gantt-bar", i, &row.project_id)),
                    Sense::click(),
                );
                if bar_response.clicked() {
                    action = Action::OpenProject(row.project_id.clone());
                }
                if bar_response.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                bar_response.on_hover_ui_at_pointer(|ui| {
                    ui.strong(row.label.trim_start_matches("  └ "));
                    ui.label(format!(
                        "{} {} {}",
                        row.start.format("%b %d, %Y"),
                        egui_phosphor::regular::ARROW_RIGHT,
                        row.end.format("%b %d, %Y"),
                    ));
                    ui.label(format!("{} days", row.duration_days()));
                    ui.label(format!("Owner: {}", row.owner));
                    ui.label(format!("Status: {}", row.status));
                    ui.label(format!("Completion: {}%", row.completion));
                });
            }

            draw_today_line(&painter, grid_origin, viewport, today, chart_height);

            // Divider between the label column and the grid
            painter.line_segment(
                [grid_origin, Pos2::new(grid_origin.x, origin.y + chart_height)],
                Stroke::new(1.0, theme::BORDER_SUBTLE),
            );
        });

    action
}

fn draw_timeline_header(
    painter: &egui::Painter,
    origin: Pos2,
    viewport: &TimelineViewport,
    width: f32,
    height: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let grid_line = |x: f32| {
        painter.line_segment(
            [Pos2::new(x, origin.y + HEADER_HEIGHT), Pos2::new(x, origin.y + height)],
            Stroke::new(0.5, theme::GRID_LINE),
        );
    };

    let mut date = viewport.start;
    let end = viewport.end;

    match viewport.scale {
        TimelineScale::Days => {
            while date <= end {
                let x = origin.x + viewport.date_to_x(date);
                grid_line(x);
                if viewport.pixels_per_day >= 20.0 {
                    let is_weekend = date.weekday().num_days_from_monday() >= 5;
                    painter.text(
                        Pos2::new(x + 3.0, origin.y + 28.0),
                        egui::Align2::LEFT_CENTER,
                        date.format("%d").to_string(),
                        theme::font_sub(),
                        if is_weekend { theme::TEXT_DIM } else { theme::TEXT_SECONDARY },
                    );
                }
                if date.day() == 1 {
                    painter.text(
                        Pos2::new(x + 3.0, origin.y + 12.0),
                        egui::Align2::LEFT_CENTER,
                        date.format("%b %Y").to_string(),
                        theme::font_header(),
                        theme::TEXT_PRIMARY,
                    );
                }
                date += chrono::Duration::days(1);
            }
        }
        TimelineScale::Weeks => {
            date -= chrono::Duration::days(date.weekday().num_days_from_monday() as i64);
            while date <= end {
                let x = origin.x + viewport.date_to_x(date);
                grid_line(x);
                painter.text(
                    Pos2::new(x + 3.0, origin.y + 28.0),
                    egui::Align2::LEFT_CENTER,
                    date.format("W%V").to_string(),
                    theme::font_sub(),
                    theme::TEXT_SECONDARY,
                );
                if date.day() <= 7 {
                    painter.text(
                        Pos2::new(x + 3.0, origin.y + 12.0),
                        egui::Align2::LEFT_CENTER,
                        date.format("%b %Y").to_string(),
                        theme::font_header(),
                        theme::TEXT_PRIMARY,
                    );
                }
                date += chrono::Duration::days(7);
            }
        }
        TimelineScale::Months => {
            date = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);
            while date <= end {
                let x = origin.x + viewport.date_to_x(date);
                grid_line(x);
                painter.text(
                    Pos2::new(x + 5.0, origin.y + 18.0),
                    egui::Align2::LEFT_CENTER,
                    date.format("%b %Y").to_string(),
                    theme::font_header(),
                    theme::TEXT_PRIMARY,
                );
                date = date
                    .checked_add_months(chrono::Months::new(1))
                    .unwrap_or(date + chrono::Duration::days(31));
            }
        }
    }
}

fn draw_today_line(
    painter: &egui::Painter,
    origin: Pos2,
    viewport: &TimelineViewport,
    today: NaiveDate,
    height: f32,
) {
    if !viewport.contains(today) {
        return;
    }
    let x = origin.x + viewport.date_to_x(today);
    painter.line_segment(
        [Pos2::new(x, origin.y + HEADER_HEIGHT), Pos2::new(x, origin.y + height)],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

/// Bars span whole days: the due date is included.
fn draw_bar(painter: &egui::Painter, origin: Pos2, viewport: &TimelineViewport, row: &GanttRow, y: f32) -> Rect {
    let x_start = origin.x + viewport.date_to_x(row.start);
    let x_end = origin.x + viewport.date_to_x(row.end + chrono::Duration::days(1));
    let bar_width = (x_end - x_start).max(6.0);
    let inset = if row.is_subtask() { theme::BAR_INSET + 3.0 } else { theme::BAR_INSET };
    let color = theme::status_color(row.status);

    let bar_rect = Rect::from_min_size(
        Pos2::new(x_start, y + inset),
        Vec2::new(bar_width, ROW_HEIGHT - inset * 2.0),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    painter.rect_filled(bar_rect.translate(Vec2::new(1.0, 2.0)), rounding, Color32::from_black_alpha(35));
    painter.rect_filled(bar_rect, rounding, color);
    painter.rect_filled(
        Rect::from_min_size(bar_rect.min, Vec2::new(bar_width, (bar_rect.height() * 0.45).max(4.0))),
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    if row.completion > 0 && row.completion < 100 {
        let progress_width = bar_width * f32::from(row.completion) / 100.0;
        painter.rect_filled(
            Rect::from_min_size(bar_rect.min, Vec2::new(progress_width, bar_rect.height())),
            rounding,
            theme::PROGRESS_OVERLAY,
        );
        let tick_x = bar_rect.left() + progress_width;
        painter.line_segment(
            [
                Pos2::new(tick_x, bar_rect.top() + 2.0),
                Pos2::new(tick_x, bar_rect.bottom() - 2.0),
            ],
            Stroke::new(1.0, Color32::from_white_alpha(60)),
        );
    }

    if bar_width > 36.0 {
        let galley = painter.layout_no_wrap(format!("{}%", row.completion), theme::font_small(), theme::text_on(color));
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        painter.with_clip_rect(bar_rect).galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }

    bar_rect
}

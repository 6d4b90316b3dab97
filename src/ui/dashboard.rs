use egui::{RichText, Ui};

use crate::app::{Action, TrackerApp};
use crate::dashboard::{charts, format_currency, upcoming_deadlines, Metrics, ProgressBand};
use crate::model::Labelled;
use crate::ui::charts::{horizontal_bars, legend_item, paired_bars, ring, Bar};
use crate::ui::{theme, widgets};

const DEADLINE_LIMIT: usize = 10;

pub fn show_dashboard(app: &TrackerApp, ui: &mut Ui) -> Action {
    let mut action = Action::None;
    let today = app.today;
    let projects: Vec<_> = app
        .filter
        .apply(&app.projects, today)
        .into_iter()
        .cloned()
        .collect();
    let metrics = Metrics::compute(&projects, &app.config.quarter, today);

    ui.horizontal(|ui| {
        ui.heading(RichText::new(format!("{} Dashboard", app.config.quarter.label)).strong());
        if !app.filter.is_empty() {
            ui.label(
                RichText::new(format!("filtered: {} of {}", projects.len(), app.projects.len()))
                    .size(11.0)
                    .color(theme::TEXT_DIM),
            );
        }
    });
    ui.add_space(6.0);

    if app.projects.is_empty() {
        widgets::card_frame().show(ui, |ui| {
            ui.label("No objectives yet.");
            if widgets::primary_button(ui, &format!("{}  Add the first objective", egui_phosphor::regular::PLUS))
                .clicked()
            {
                action = Action::NewProject;
            }
        });
        return action;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            // ── Metric cards ─────────────────────────────────────────────
            let card_width = ((ui.available_width() - 5.0 * 12.0) / 6.0 - 20.0).max(90.0);
            ui.horizontal_wrapped(|ui| {
                widgets::metric_card(ui, "Objectives", &metrics.total_projects.to_string(), None, card_width);
                widgets::metric_card(
                    ui,
                    "Completed",
                    &metrics.completed.to_string(),
                    Some(&format!("{:.0}% of objectives", metrics.completed_fraction() * 100.0)),
                    card_width,
                );
                widgets::metric_card(ui, "Overdue", &metrics.overdue.to_string(), None, card_width);
                widgets::metric_card(
                    ui,
                    "Avg. Completion",
                    &format!("{:.0}%", metrics.average_completion),
                    None,
                    card_width,
                );
                widgets::metric_card(
                    ui,
                    "Milestones Done",
                    &format!("{}/{}", metrics.subtasks_done, metrics.subtasks_total),
                    Some(&format!("{}%", metrics.overall_subtask_percentage())),
                    card_width,
                );
                let days = metrics
                    .days_left_in_quarter
                    .map_or_else(|| "Ended".to_string(), |d| d.to_string());
                widgets::metric_card(ui, "Days Left in Quarter", &days, None, card_width);
            });

            ui.add_space(8.0);
            ui.horizontal_wrapped(|ui| {
                widgets::metric_card(ui, "Total Budget", &format_currency(metrics.budget), None, card_width);
                widgets::metric_card(ui, "Spent", &format_currency(metrics.budget_spent), None, card_width);
                widgets::metric_card(
                    ui,
                    "Potential Savings",
                    &format_currency(metrics.potential_savings),
                    None,
                    card_width,
                );
            });

            // ── Charts ───────────────────────────────────────────────────
            ui.add_space(8.0);
            ui.columns(2, |cols| {
                widgets::card_frame().show(&mut cols[0], |ui| {
                    widgets::section_header(ui, "Completion by Objective");
                    let bars: Vec<Bar> = charts::completion_bars(&projects, today)
                        .into_iter()
                        .map(|b| Bar {
                            tooltip: Some(format!("{}\n{}\nOwner: {}", b.label, b.status, b.owner)),
                            color: theme::band_color(ProgressBand::for_percentage(b.completion)),
                            caption: format!("{}%", b.completion),
                            value: f32::from(b.completion),
                            label: b.label,
                        })
                        .collect();
                    horizontal_bars(ui, &bars, 100.0, 170.0);
                });

                widgets::card_frame().show(&mut cols[1], |ui| {
                    widgets::section_header(ui, "Overall Progress");
                    ui.horizontal(|ui| {
                        let pct = metrics.overall_subtask_percentage();
                        ring(
                            ui,
                            f32::from(pct) / 100.0,
                            120.0,
                            theme::band_color(ProgressBand::for_percentage(pct)),
                            &format!("{}%", pct),
                        );
                        ui.vertical(|ui| {
                            ui.label(RichText::new("Status").strong().size(12.0));
                            for (status, count) in charts::status_distribution(&projects, today) {
                                legend_item(ui, theme::status_color(status), &format!("{}  {}", status, count));
                            }
                            ui.add_space(4.0);
                            ui.label(RichText::new("Priority").strong().size(12.0));
                            for (priority, count) in charts::priority_counts(&projects) {
                                legend_item(
                                    ui,
                                    theme::priority_color(priority),
                                    &format!("{}  {}", priority.label(), count),
                                );
                            }
                        });
                    });
                });
            });

            ui.add_space(8.0);
            ui.columns(2, |cols| {
                widgets::card_frame().show(&mut cols[0], |ui| {
                    widgets::section_header(ui, "Owner Workload");
                    let load = charts::owner_workload(&projects);
                    let max = load.iter().map(|l| l.estimated_hours).max().unwrap_or(0) as f32;
                    let bars: Vec<Bar> = load
                        .into_iter()
                        .map(|l| Bar {
                            caption: format!("{} h", l.estimated_hours),
                            tooltip: Some(format!(
                                "{}: {} objectives, {} milestones",
                                l.owner, l.projects, l.subtasks
                            )),
                            value: l.estimated_hours as f32,
                            color: theme::ACCENT,
                            label: l.owner,
                        })
                        .collect();
                    horizontal_bars(ui, &bars, max, 150.0);
                });

                widgets::card_frame().show(&mut cols[1], |ui| {
                    widgets::section_header(ui, "Budget vs Spent");
                    let rows: Vec<(String, u64, u64)> = charts::budget_bars(&projects)
                        .into_iter()
                        .map(|b| (b.label, b.budget, b.spent))
                        .collect();
                    paired_bars(ui, &rows, 60.0);
                    ui.horizontal(|ui| {
                        legend_item(ui, theme::BRAND_LIGHT, "Budget");
                        legend_item(ui, theme::ACCENT, "Spent");
                        legend_item(ui, theme::RED, "Over budget");
                    });
                });
            });

            ui.add_space(8.0);
            widgets::card_frame().show(ui, |ui| {
                widgets::section_header(ui, "Milestones Due per Month");
                let months = charts::milestones_by_month(&projects, &app.config.quarter);
                let max = months.iter().map(|(_, n)| *n).max().unwrap_or(0) as f32;
                let bars: Vec<Bar> = months
                    .into_iter()
                    .map(|(month, n)| Bar {
                        label: month,
                        value: n as f32,
                        color: theme::BRAND_LIGHT,
                        caption: n.to_string(),
                        tooltip: None,
                    })
                    .collect();
                horizontal_bars(ui, &bars, max, 100.0);
            });

            // ── Upcoming deadlines ───────────────────────────────────────
            ui.add_space(8.0);
            widgets::card_frame().show(ui, |ui| {
                widgets::section_header(ui, "Upcoming Deadlines");
                let deadlines = upcoming_deadlines(&projects, today, DEADLINE_LIMIT);
                if deadlines.is_empty() {
                    ui.label(RichText::new("No open milestones with due dates").color(theme::TEXT_DIM));
                    return;
                }
                egui::Grid::new("deadlines")
                    .num_columns(5)
                    .striped(true)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        for header in ["OBJECTIVE", "MILESTONE", "OWNER", "DUE", "STATUS"] {
                            widgets::field_label(ui, header);
                        }
                        ui.end_row();

                        for d in &deadlines {
                            if ui.link(&d.project_label).clicked() {
                                action = Action::OpenProject(d.project_id.clone());
                            }
                            ui.label(&d.milestone);
                            ui.label(RichText::new(&d.owner).color(theme::TEXT_SECONDARY));
                            let when = match d.days_left {
                                0 => "today".to_string(),
                                n if n < 0 => format!("{} days ago", -n),
                                n => format!("in {} days", n),
                            };
                            ui.label(format!("{}  ({})", d.due.format("%b %d"), when));
                            widgets::pill(ui, d.urgency.label(), theme::urgency_color(d.urgency));
                            ui.end_row();
                        }
                    });
            });
        });

    action
}

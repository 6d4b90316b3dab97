#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use objective_tracker::app::TrackerApp;
use objective_tracker::config::AppConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::resolve();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1360.0, 820.0])
            .with_min_inner_size([960.0, 560.0])
            .with_title("Objective Tracker"),
        ..Default::default()
    };

    eframe::run_native(
        "Objective Tracker",
        options,
        Box::new(|cc| Ok(Box::new(TrackerApp::new(cc, config)))),
    )
}

mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::TinDashboardApp;
use config::SourceConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = SourceConfig::load_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Performance Analysis of Tin-Based Anode Materials",
        options,
        Box::new(move |_cc| Ok(Box::new(TinDashboardApp::new(config)))),
    )
}

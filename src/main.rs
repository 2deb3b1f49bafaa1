mod app;
mod config;
mod dashboard;
mod data;
mod export;
mod state;
mod stats;
mod theme;
mod ui;

use app::{DashboardApp, Session};
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::default();
    let session = match data::loader::load_file(&config.data_path, &config) {
        Ok(dataset) => Session::Ready(Box::new(AppState::new(dataset, config))),
        Err(e) => {
            log::error!("Failed to load dataset: {e}");
            Session::Failed(e.to_string())
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Netflix Top 10 Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(session)))),
    )
}

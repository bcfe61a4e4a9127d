mod app;
mod canvas;
mod ui;

use app::HorizonMarkerApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Horizon Marker starting...");

    let native_options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(1280.0, 800.0)),
        min_window_size: Some(egui::vec2(800.0, 600.0)),
        ..Default::default()
    };

    eframe::run_native(
        "Horizon Marker",
        native_options,
        Box::new(|cc| Box::new(HorizonMarkerApp::new(cc))),
    )
}

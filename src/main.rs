mod app;
mod charts;
mod color;
mod data;
mod state;
mod stats;
mod ui;

use std::path::PathBuf;

use app::PremiumLensApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // The dashboard cannot render without data: load before the UI starts
    // and treat failure as fatal.
    let path: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "insurance.csv".to_string())
        .into();

    let dataset = match data::loader::load_file(&path) {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            eprintln!("Error: cannot load {}: {e:#}", path.display());
            std::process::exit(1);
        }
    };
    log::info!(
        "Loaded {} records across {} regions",
        dataset.len(),
        dataset.regions.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Premium Lens – Health Insurance Analysis",
        options,
        Box::new(move |_cc| Ok(Box::new(PremiumLensApp::new(dataset)))),
    )
}

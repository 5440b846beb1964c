//! Native map window
//!
//! Run with: cargo run --bin trips-view --features native

use std::path::PathBuf;

use eframe::egui;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use trips_vis::app::TripsApp;
use trips_vis::core::{Config, Dataset};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,trips_vis=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let mut config = match std::env::var("TRIPS_CONFIG") {
        Ok(path) => Config::load(&PathBuf::from(path))?,
        Err(_) => Config::default(),
    };
    config.apply_env()?;

    // Load errors are shown in the window rather than aborting
    let dataset = Dataset::from_config(&config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Trips")
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    info!("Opening map window");
    eframe::run_native(
        "trips-vis",
        options,
        Box::new(move |cc| Ok(Box::new(TripsApp::new(cc, config, dataset)))),
    )?;
    Ok(())
}

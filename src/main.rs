mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use app::DashboardApp;
use clap::Parser;
use config::Config;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Config::parse();

    // The survey is read exactly once; every interaction works off this table.
    let table = data::loader::load_file(&config.data)
        .inspect_err(|e| log::error!("Failed to load {}: {e}", config.data.display()))
        .with_context(|| format!("loading survey data from {}", config.data.display()))?;
    log::info!(
        "Loaded {} rows ({} groups) from {}",
        table.len(),
        data::filter::distinct_groups(&table).len(),
        config.data.display()
    );
    if table.is_empty() {
        log::warn!("{} contains no rows; every chart will be empty", config.data.display());
    }
    let missing = table.missing_value_count();
    if missing > 0 {
        log::warn!("{missing} rows have no Value; they are left out of lines and averages");
    }
    let table = Arc::new(table);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width, config.height])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Mental Health Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(table)))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))
}

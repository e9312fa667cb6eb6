use std::path::PathBuf;

use clap::Parser;

/// Where the dashboard looks for its dataset when nothing else is configured.
pub const DEFAULT_DATA_PATH: &str = "data/Mental_Health_Final_Project_data.csv";

/// Explore mental health care access during COVID-19 (Household Pulse Survey)
#[derive(Parser, Debug, Clone)]
#[command(name = "pulse-dashboard", version)]
pub struct Config {
    /// Survey table to load (.csv, .tsv, .json or .parquet)
    #[arg(long, env = "PULSE_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Initial window width in points
    #[arg(long, default_value_t = 1280.0)]
    pub width: f32,

    /// Initial window height in points
    #[arg(long, default_value_t = 860.0)]
    pub height: f32,
}

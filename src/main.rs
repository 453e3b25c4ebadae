//! RegionSnap - batch PDF region cropping and OCR tabulation
//!
//! Draw named rectangular regions over rendered PDF pages once, then
//! extract the matching crops from every loaded document and optionally
//! OCR the output tree into a spreadsheet.

mod app;
mod catalog;
mod config;
mod document;
mod error;
mod extract;
mod geometry;
mod ocr;
mod spreadsheet;
mod tabulate;
mod ui;
mod viewer;

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::AppConfig;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("RegionSnap starting...");

    let config = load_or_create_config();

    ui::run(config).map_err(|e| anyhow::anyhow!("window error: {e}"))?;

    info!("RegionSnap shutdown complete");

    Ok(())
}

/// Load configuration from file or create default
fn load_or_create_config() -> AppConfig {
    if let Ok(config_dir) = config::get_config_dir() {
        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            if let Ok(config) = config::load_config(&config_path) {
                info!("Loaded configuration from {:?}", config_path);
                return config;
            }
        } else if let Err(e) = config::save_config(&AppConfig::default(), &config_path) {
            info!("Could not write default configuration: {e}");
        }
    }
    info!("Using default configuration");
    AppConfig::default()
}

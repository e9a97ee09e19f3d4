mod app;
mod color;
mod config;
mod data;
mod error;
mod export;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use app::ScopusLensApp;
use clap::Parser;
use config::{Cli, Settings};
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = Settings::resolve(&cli)?;

    // A missing workbook or sheet is fatal: there is nothing to show without it.
    let catalog = data::loader::load_file(&settings.data_path, &settings.sheet)
        .inspect_err(|e| log::error!("Failed to load publications: {e}"))
        .with_context(|| format!("loading {}", settings.data_path.display()))?;
    if catalog.is_empty() {
        log::warn!("{} contains no publications", settings.data_path.display());
    }

    let state = AppState::new(Arc::new(catalog), settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 860.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Zh Scopus – Publication Portal",
        options,
        Box::new(|_cc| Ok(Box::new(ScopusLensApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("UI terminated with an error: {e}"))
}

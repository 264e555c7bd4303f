mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::PenguinExplorerApp;
use config::ExplorerConfig;
use eframe::egui;
use state::Session;

fn main() -> Result<()> {
    env_logger::init();

    run().inspect_err(|e| log::error!("{e:#}"))
}

fn run() -> Result<()> {
    let config = ExplorerConfig::from_env()?;
    let table = data::load_prepared()?;
    let session = Session::new(table).context("building initial plot")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(PenguinExplorerApp::new(session, config)))),
    )
    .map_err(|e| anyhow!("event loop failed: {e}"))
}

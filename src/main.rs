mod config;
mod error;
mod file_utils;
mod image_cache;
mod image_loader;
mod services;
mod settings;
mod startup;
mod state;
mod ui;

use image_loader::ThumbnailGenerator;
use services::{SessionOptions, SortingSession};
use settings::JsonSettingsStore;
use std::sync::Arc;
use ui::{ConsoleView, Shell};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(debug_assertions)]
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();
    #[cfg(not(debug_assertions))]
    env_logger::init();

    let store = JsonSettingsStore::default_location();
    log::debug!("Using settings file {}", store.path().display());

    let mut session = SortingSession::new(
        store,
        ConsoleView::new(std::io::stdout()),
        Arc::new(ThumbnailGenerator),
        SessionOptions::default(),
    );

    startup::configure_startup_opening(&mut session);

    let mut shell = Shell::new(std::io::stdout()).with_geometry(startup::terminal_geometry());
    shell.run(&mut session, std::io::stdin().lock())?;

    Ok(())
}

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use project_board::app::BoardApp;
use project_board::config::{AppPaths, AppSettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "project_board=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let paths = AppPaths::discover();
    let settings = AppSettings::load(&paths.settings);
    tracing::info!(
        settings = %paths.settings.display(),
        store = %settings.resolved_store_path(&paths).display(),
        "starting project board"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([800.0, 480.0])
            .with_title("Project Board"),
        ..Default::default()
    };

    eframe::run_native(
        "Project Board",
        options,
        Box::new(|cc| Ok(Box::new(BoardApp::new(cc, settings, paths)?))),
    )
}

mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::DashboardApp;
use clap::Parser;
use eframe::egui;
use health_dashboards::dashboard::DashboardKind;
use health_dashboards::Settings;
use state::AppState;

/// Desktop dashboards for Israeli health indicators, heavy drinking and
/// municipality casualties.
#[derive(Debug, Parser)]
#[command(name = "health-dashboards", version)]
struct Cli {
    /// JSON settings file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the source files (overrides the settings file).
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Dashboard to open first: health, drinking or casualties.
    #[arg(long, default_value = "health")]
    dashboard: DashboardKind,
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(dir) = &cli.data_dir {
        settings.data_dir = dir.clone();
    }
    Ok(settings)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    log::info!(
        "Starting on the {} dashboard, data directory {}",
        cli.dashboard,
        settings.data_dir.display()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(settings, cli.dashboard);
    eframe::run_native(
        "Health Dashboards",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the viewer: {e}"))
}

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use rust_project_planner::app::PlannerApp;
use rust_project_planner::config::AppConfig;

/// Project planning dashboard with list, board and timeline views.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Project snapshot (JSON) to open
    #[arg(long)]
    data: Option<PathBuf>,

    /// Initial location, e.g. "status=active&viewType=timeline"
    #[arg(long)]
    query: Option<String>,

    /// Pin "today" (yyyy-mm-dd)
    #[arg(long)]
    today: Option<NaiveDate>,
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(AppConfig::default_path);
    let mut config = AppConfig::load_or_default(config_path.as_deref());
    // First run: leave a config file behind for the user to edit.
    if let Some(path) = config_path.as_deref().filter(|p| !p.exists()) {
        if let Err(e) = config.save_to(path) {
            log::warn!("could not write default config: {}", e);
        }
    }
    if let Some(data) = cli.data {
        config.data_path = Some(data);
    }
    if let Some(today) = cli.today {
        config.today = Some(today);
    }
    let query = cli.query.unwrap_or_else(|| config.default_query.clone());
    log::info!(
        "starting planner (data: {:?}, today: {})",
        config.data_path,
        config.today()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Project Planner"),
        ..Default::default()
    };

    eframe::run_native(
        "Project Planner",
        options,
        Box::new(move |cc| Ok(Box::new(PlannerApp::new(cc, config, &query)))),
    )
}

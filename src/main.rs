use clap::Parser;
use eframe::egui;

use goalie_dash::app::GoalieDashApp;
use goalie_dash::config::{Cli, Config};

fn main() -> eframe::Result {
    env_logger::init();

    let config = Config::from_cli(Cli::parse());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 860.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Goalie Dash – NHL Goalie FPTS",
        options,
        Box::new(move |_cc| Ok(Box::new(GoalieDashApp::new(&config)))),
    )
}

use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GoalieDashApp {
    pub state: AppState,
}

impl GoalieDashApp {
    /// Build the app and open the configured game log, if any.
    pub fn new(config: &Config) -> Self {
        let mut state = AppState::new(config);
        if let Some(path) = &config.data_path {
            state.load_path(path);
        }
        Self { state }
    }
}

impl eframe::App for GoalieDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Right side panel: summary table ----
        egui::SidePanel::right("table_panel")
            .default_width(380.0)
            .resizable(true)
            .show(ctx, |ui| {
                table::summary_table(ui, &mut self.state);
            });

        // ---- Central panel: histogram ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("NHL Goalie Fantasy Point Distribution, 2022-23");
            plot::histogram_plot(ui, &self.state);
        });
    }
}

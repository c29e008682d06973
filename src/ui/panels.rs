use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::Location;
use crate::data::teams::ALL_TEAMS_LABEL;
use crate::state::{AppState, SelectionMode, Side};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.pipeline.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Location ----
            ui.strong("Location");
            let mut location = state.location;
            egui::ComboBox::from_id_salt("location")
                .selected_text(location.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for option in Location::ALL {
                        ui.selectable_value(&mut location, option, option.to_string());
                    }
                });
            state.set_location(location);
            ui.separator();

            match state.mode {
                SelectionMode::MultiById => {
                    team_checklist(ui, state, Side::Team, "Team");
                    team_checklist(ui, state, Side::Opponent, "Opponent");
                }
                SelectionMode::SingleById => {
                    code_dropdown(ui, state, Side::Team, "Team");
                    ui.add_space(6.0);
                    code_dropdown(ui, state, Side::Opponent, "Opponent");
                }
                SelectionMode::SingleByName => {
                    name_dropdown(ui, state, Side::Team, "Team");
                    ui.add_space(6.0);
                    name_dropdown(ui, state, Side::Opponent, "Opponent");
                }
            }
        });
}

/// Collapsible checkbox list of team codes for one side.
fn team_checklist(ui: &mut Ui, state: &mut AppState, side: Side, title: &str) {
    let options = state.team_options();
    let n_selected = state.ids(side).len();
    let header_text = format!("{title}  ({n_selected}/{})", options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(side);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(side);
                }
            });

            for id in options {
                let mut checked = state.ids(side).contains(&id);
                if ui.checkbox(&mut checked, state.codes.label(id)).changed() {
                    state.toggle_team(side, id);
                }
            }
        });
}

/// Single-team dropdown over the code table, "ALL TEAMS" first.
fn code_dropdown(ui: &mut Ui, state: &mut AppState, side: Side, title: &str) {
    let current = match side {
        Side::Team => state.team_choice,
        Side::Opponent => state.opponent_choice,
    };
    let mut choice = current;

    ui.strong(title);
    egui::ComboBox::from_id_salt(("code", title))
        .selected_text(state.codes.label(current))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for (id, label) in state.codes.options_with_sentinel() {
                ui.selectable_value(&mut choice, id, label);
            }
        });

    if choice != current {
        state.set_team_choice(side, choice);
    }
}

/// Single-team dropdown keyed by team name, "ALL TEAMS" first.
fn name_dropdown(ui: &mut Ui, state: &mut AppState, side: Side, title: &str) {
    let names = state.team_name_options();
    let current = match side {
        Side::Team => state.team_name.clone(),
        Side::Opponent => state.opponent_name.clone(),
    };
    let mut choice = current.clone();

    ui.strong(title);
    egui::ComboBox::from_id_salt(("name", title))
        .selected_text(current.as_deref().unwrap_or(ALL_TEAMS_LABEL))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut choice, None, ALL_TEAMS_LABEL);
            for name in names {
                let label = name.clone();
                ui.selectable_value(&mut choice, Some(name), label);
            }
        });

    if choice != current {
        state.set_team_name(side, choice);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.view.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export table…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(view)) = (state.dataset(), &state.view) {
            ui.label(format!(
                "{} starts loaded, {} matching, {} goalies",
                ds.len(),
                view.matched,
                view.table.len()
            ));
        }

        ui.separator();

        let mut mode = state.mode;
        egui::ComboBox::from_id_salt("selection_mode")
            .selected_text(mode.label())
            .show_ui(ui, |ui: &mut Ui| {
                for option in SelectionMode::ALL {
                    ui.selectable_value(&mut mode, option, option.label());
                }
            });
        state.set_mode(mode);

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open goalie game log")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export goalie table")
        .set_file_name("goalie_table.csv")
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        export_to(state, &path);
    }
}

fn export_to(state: &mut AppState, path: &Path) {
    match crate::data::export::export_table(state.table(), path) {
        Ok(()) => state.status_message = None,
        Err(e) => {
            log::error!("Failed to export table: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

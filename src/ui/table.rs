use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::AggregateRow;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Per-player summary table (right panel)
// ---------------------------------------------------------------------------

/// Render the paginated goalie summary table.
pub fn summary_table(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Goalies");
    ui.separator();

    if state.view.is_none() {
        ui.label("No dataset loaded.");
        return;
    }
    if state.table().is_empty() {
        ui.label("No goalies match the current filters.");
        return;
    }

    pager(ui, state);
    ui.add_space(4.0);

    let rows = state.page_rows();
    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::remainder().at_least(120.0))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .header(ROW_HEIGHT, |mut header| {
            for title in AggregateRow::HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let r = &rows[row.index()];
                row.col(|ui| {
                    ui.label(&r.name);
                });
                row.col(|ui| {
                    ui.label(&r.team);
                });
                row.col(|ui| {
                    ui.label(r.starts.to_string());
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", r.avg_points));
                });
            });
        });
}

fn pager(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        if ui
            .add_enabled(state.page > 0, eframe::egui::Button::new("◀"))
            .clicked()
        {
            state.prev_page();
        }
        ui.label(format!("Page {} of {}", state.page + 1, state.page_count()));
        if ui
            .add_enabled(
                state.page + 1 < state.page_count(),
                eframe::egui::Button::new("▶"),
            )
            .clicked()
        {
            state.next_page();
        }
    });
}

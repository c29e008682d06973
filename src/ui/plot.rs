use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, VLine};

use crate::color::{MEAN_MARKER, bin_palette};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// FPTS histogram (central panel)
// ---------------------------------------------------------------------------

/// Render the FPTS histogram with its mean marker in the central panel.
pub fn histogram_plot(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a game log to view the distribution  (File → Open…)");
        });
        return;
    };

    if view.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new("No starts match the current filters").italics());
        });
        return;
    }

    let hist = &view.histogram;
    let spec = hist.spec;

    let mut summary = format!("{} starts", view.matched);
    if let Some(mean) = hist.mean {
        summary.push_str(&format!("  ·  mean {mean:.2} FPTS"));
    }
    if hist.outside > 0 {
        summary.push_str(&format!(
            "  ·  {} outside [{}, {}]",
            hist.outside, spec.min, spec.max
        ));
    }
    ui.label(summary);

    let bars: Vec<Bar> = hist
        .bins
        .iter()
        .zip(bin_palette(&hist.bins, &spec))
        .map(|(bin, color)| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.upper - bin.lower)
                .fill(color)
                .name(format!("{} to {}", bin.lower, bin.upper))
        })
        .collect();

    Plot::new("fpts_histogram")
        .legend(Legend::default())
        .x_axis_label("FPTS (binned)")
        .y_axis_label("Count of starts")
        .include_x(spec.min)
        .include_x(spec.max)
        .include_y(0.0)
        .include_y(hist.max_count() as f64 * 1.1)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Starts"));

            if let Some(mean) = hist.mean {
                plot_ui.vline(
                    VLine::new(mean)
                        .color(MEAN_MARKER)
                        .width(2.0)
                        .name(format!("Mean ({mean:.2})")),
                );
            }
        });
}

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::histogram::{Bin, HistogramSpec};

// ---------------------------------------------------------------------------
// Histogram bar colours
// ---------------------------------------------------------------------------

/// Hue for the lowest bin (red) and the highest (green).
const HUE_LOW: f32 = 0.0;
const HUE_HIGH: f32 = 130.0;

/// Colour of the mean marker.
pub const MEAN_MARKER: Color32 = Color32::RED;

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Position of a bin inside the display extent, 0.0 at `min` and 1.0 at `max`.
fn extent_fraction(bin: &Bin, spec: &HistogramSpec) -> f32 {
    let span = spec.max - spec.min;
    if span <= 0.0 {
        return 0.0;
    }
    ((bin.center() - spec.min) / span).clamp(0.0, 1.0) as f32
}

/// Bar colour for a bin: a red → green ramp so bad nights read as red.
pub fn bin_color(bin: &Bin, spec: &HistogramSpec) -> Color32 {
    let t = extent_fraction(bin, spec);
    let hue = HUE_LOW + t * (HUE_HIGH - HUE_LOW);
    hsl_to_color32(Hsl::new(hue, 0.65, 0.5))
}

/// One colour per bin, in bin order.
pub fn bin_palette(bins: &[Bin], spec: &HistogramSpec) -> Vec<Color32> {
    bins.iter().map(|b| bin_color(b, spec)).collect()
}

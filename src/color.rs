use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

use crate::data::model::Smoker;

// ---------------------------------------------------------------------------
// Fixed categorical mapping: smoker status
// ---------------------------------------------------------------------------

/// Warm red for smokers.
pub const SMOKER_RED: Color32 = Color32::from_rgb(0xFF, 0x4B, 0x4B);
/// Cool green for non-smokers.
pub const NON_SMOKER_GREEN: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

/// The two-color mapping shared by every smoker-encoded chart.
pub fn smoker_color(smoker: Smoker) -> Color32 {
    match smoker {
        Smoker::Yes => SMOKER_RED,
        Smoker::No => NON_SMOKER_GREEN,
    }
}

// ---------------------------------------------------------------------------
// Continuous scales
// ---------------------------------------------------------------------------

/// Interpolate through evenly spaced stops in linear RGB.
fn gradient(stops: &[LinSrgb], t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let segments = (stops.len() - 1) as f32;
    let pos = t * segments;
    let i = (pos.floor() as usize).min(stops.len() - 2);
    let frac = pos - i as f32;

    let mixed = stops[i].mix(stops[i + 1], frac);
    let rgb: Srgb = Srgb::from_linear(mixed);
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

fn lin(r: u8, g: u8, b: u8) -> LinSrgb {
    Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0).into_linear()
}

/// Diverging red–white–blue scale for correlation values in `[-1, 1]`.
pub fn diverging(r: f64) -> Color32 {
    let stops = [lin(178, 24, 43), lin(247, 247, 247), lin(33, 102, 172)];
    let t = ((r.clamp(-1.0, 1.0) + 1.0) / 2.0) as f32;
    gradient(&stops, t)
}

/// Sequential viridis-style scale for a normalised value in `[0, 1]`.
pub fn sequential(t: f64) -> Color32 {
    let stops = [
        lin(68, 1, 84),
        lin(59, 82, 139),
        lin(33, 145, 140),
        lin(94, 201, 98),
        lin(253, 231, 37),
    ];
    gradient(&stops, t as f32)
}

/// Text color that stays readable on top of a scale color.
pub fn contrast_text(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoker_mapping_is_fixed() {
        assert_eq!(smoker_color(Smoker::Yes), SMOKER_RED);
        assert_eq!(smoker_color(Smoker::No), NON_SMOKER_GREEN);
    }

    #[test]
    fn diverging_endpoints() {
        // Perfect negative correlation is red, perfect positive is blue.
        let neg = diverging(-1.0);
        let pos = diverging(1.0);
        assert!(neg.r() > neg.b());
        assert!(pos.b() > pos.r());
    }

    #[test]
    fn sequential_is_clamped() {
        assert_eq!(sequential(-0.5), sequential(0.0));
        assert_eq!(sequential(1.5), sequential(1.0));
    }
}

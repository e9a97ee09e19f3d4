use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Quartile;

// ---------------------------------------------------------------------------
// Bar colours
// ---------------------------------------------------------------------------

/// `n` colours along a blue-to-teal band, darkest first, for ranked bars.
pub fn ranked_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.0 } else { i as f32 / (n - 1) as f32 };
            let hsl = Hsl::new(215.0 - 45.0 * t, 0.65, 0.35 + 0.3 * t);
            to_color32(hsl.into_color())
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Quartile badges
// ---------------------------------------------------------------------------

pub fn quartile_color(quartile: Option<Quartile>) -> Color32 {
    match quartile {
        Some(Quartile::Q1) => Color32::from_rgb(46, 139, 87),
        Some(Quartile::Q2) => Color32::from_rgb(70, 130, 180),
        Some(Quartile::Q3) => Color32::from_rgb(218, 165, 32),
        Some(Quartile::Q4) => Color32::from_rgb(205, 92, 92),
        None => Color32::GRAY,
    }
}

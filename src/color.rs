use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Colour used for anything not in the map (e.g. the single bar series).
pub const FALLBACK_COLOR: Color32 = Color32::from_rgb(99, 150, 220);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl: Hsl = Hsl::new(hue, 0.70, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: subgroup → Color32
// ---------------------------------------------------------------------------

/// Maps every subgroup of the current group to a fixed colour.
///
/// Built from the full option list rather than the selection, so a
/// subgroup keeps its colour while others are toggled on and off.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new(subgroups: &[String]) -> Self {
        let mapping = subgroups
            .iter()
            .cloned()
            .zip(generate_palette(subgroups.len()))
            .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a subgroup.
    pub fn color_for(&self, subgroup: &str) -> Color32 {
        self.mapping.get(subgroup).copied().unwrap_or(FALLBACK_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_size_and_distinctness() {
        let palette = generate_palette(5);
        assert_eq!(palette.len(), 5);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_color_for_known_and_unknown() {
        let subs = vec!["Female".to_string(), "Male".to_string()];
        let map = ColorMap::new(&subs);
        assert_ne!(map.color_for("Female"), map.color_for("Male"));
        assert_eq!(map.color_for("Other"), FALLBACK_COLOR);
    }

    #[test]
    fn test_colors_stable_for_same_options() {
        let subs = vec!["Ohio".to_string(), "Texas".to_string(), "Utah".to_string()];
        let a = ColorMap::new(&subs);
        let b = ColorMap::new(&subs);
        assert_eq!(a.color_for("Texas"), b.color_for("Texas"));
    }
}

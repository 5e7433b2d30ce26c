use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::config::REGION_COLORS;

/// Background of blank cells.
pub const EMPTY_CELL: Color32 = Color32::from_rgb(220, 220, 220);

/// Band shades, odd bands first.
pub const BAND_PRIMARY: Color32 = Color32::from_rgb(255, 255, 255);
pub const BAND_ALTERNATE: Color32 = Color32::from_rgb(245, 245, 245);

/// Pastel hue `i` of `n` evenly spaced around the colour wheel.
fn pastel(i: usize, n: usize) -> Color32 {
    let hue = (i as f32 / n.max(1) as f32) * 360.0;
    let rgb: Srgb = Hsl::new(hue, 0.6, 0.85).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Channel-wise average of two colours.
pub fn blend(a: Color32, b: Color32) -> Color32 {
    let mid = |x: u8, y: u8| ((x as u16 + y as u16) / 2) as u8;
    Color32::from_rgb(mid(a.r(), b.r()), mid(a.g(), b.g()), mid(a.b(), b.b()))
}

// ---------------------------------------------------------------------------
// Region → Color32
// ---------------------------------------------------------------------------

/// Background colour per region value.
///
/// Known regions keep their fixed colour; any other region found in the
/// sheet gets a generated hue.
#[derive(Debug, Clone)]
pub struct RegionPalette {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl Default for RegionPalette {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl RegionPalette {
    pub fn new(regions: &[String]) -> Self {
        let mut mapping: BTreeMap<String, Color32> = REGION_COLORS
            .iter()
            .map(|(name, [r, g, b])| (name.to_string(), Color32::from_rgb(*r, *g, *b)))
            .collect();

        let unknown: Vec<&String> = regions
            .iter()
            .filter(|r| !mapping.contains_key(r.as_str()))
            .collect();
        for (i, region) in unknown.iter().enumerate() {
            mapping.insert(region.to_string(), pastel(i, unknown.len()));
        }

        RegionPalette {
            mapping,
            default_color: Color32::WHITE,
        }
    }

    /// Colour for a (trimmed) region value; white for blank or unknown.
    pub fn color_for(&self, region: &str) -> Color32 {
        self.mapping
            .get(region.trim())
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Background of one cell: region colour (gray when the cell is blank),
    /// blended with its band shade when bands are shown.
    pub fn cell_background(&self, region: &str, cell: &str, band: Option<usize>) -> Color32 {
        let base = if cell.trim().is_empty() {
            EMPTY_CELL
        } else {
            self.color_for(region)
        };
        match band {
            Some(b) if b % 2 == 0 => blend(base, BAND_ALTERNATE),
            Some(_) => blend(base, BAND_PRIMARY),
            None => base,
        }
    }
}

use std::collections::BTreeMap;

use eframe::egui::{self, Color32, Stroke};
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Theme tokens
// ---------------------------------------------------------------------------

/// Series colour cycle shared by both modes.
pub const SERIES: [Color32; 4] = [
    Color32::from_rgb(0xE5, 0x09, 0x14),
    Color32::from_rgb(0xB2, 0x07, 0x10),
    Color32::from_rgb(0x64, 0x74, 0x8B),
    Color32::from_rgb(0x11, 0x18, 0x27),
];

/// Colour tokens for one display mode. Passed explicitly to every
/// drawing function.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub light: bool,
    pub background: Color32,
    pub panel: Color32,
    pub panel_strong: Color32,
    pub stroke: Color32,
    pub text: Color32,
    pub muted: Color32,
    pub chip: Color32,
    pub sidebar: Color32,
    pub grid: Color32,
    /// Chart background; also the donut hole.
    pub plot_background: Color32,
    pub accent: Color32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            light: false,
            background: Color32::from_rgb(0x0B, 0x0B, 0x0F),
            panel: Color32::from_rgba_unmultiplied(255, 255, 255, 15),
            panel_strong: Color32::from_rgba_unmultiplied(255, 255, 255, 20),
            stroke: Color32::from_rgba_unmultiplied(255, 255, 255, 31),
            text: Color32::from_rgb(0xED, 0xED, 0xED),
            muted: Color32::from_rgba_unmultiplied(237, 237, 237, 179),
            chip: Color32::from_rgba_unmultiplied(229, 9, 20, 41),
            sidebar: Color32::from_rgb(0x12, 0x12, 0x16),
            grid: Color32::from_rgba_unmultiplied(255, 255, 255, 31),
            plot_background: Color32::from_rgb(0x0B, 0x0B, 0x0F),
            accent: SERIES[0],
        }
    }

    pub fn light() -> Self {
        Self {
            light: true,
            background: Color32::from_rgb(0xF6, 0xF7, 0xFB),
            panel: Color32::from_rgba_unmultiplied(0, 0, 0, 10),
            panel_strong: Color32::from_rgba_unmultiplied(0, 0, 0, 15),
            stroke: Color32::from_rgba_unmultiplied(0, 0, 0, 26),
            text: Color32::from_rgb(0x0F, 0x17, 0x2A),
            muted: Color32::from_rgba_unmultiplied(15, 23, 42, 158),
            chip: Color32::from_rgba_unmultiplied(229, 9, 20, 26),
            sidebar: Color32::from_rgb(0xF1, 0xF2, 0xF6),
            grid: Color32::from_rgba_unmultiplied(15, 23, 42, 31),
            plot_background: Color32::WHITE,
            accent: SERIES[0],
        }
    }

    pub fn for_mode(light: bool) -> Self {
        if light {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// egui visuals carrying this theme's tokens.
    pub fn visuals(&self) -> egui::Visuals {
        let mut v = if self.light {
            egui::Visuals::light()
        } else {
            egui::Visuals::dark()
        };
        v.override_text_color = Some(self.text);
        v.panel_fill = self.background;
        v.window_fill = self.background;
        v.extreme_bg_color = self.plot_background;
        v.faint_bg_color = self.panel;
        v.selection.bg_fill = self.accent;
        v.selection.stroke = Stroke::new(1.0, self.text);
        v.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.stroke);
        v
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Stable colours per category so slices keep their colour across filters.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Use the series cycle when it is long enough, otherwise spread hues.
    pub fn new(labels: &[String]) -> Self {
        let palette = if labels.len() <= SERIES.len() {
            SERIES.to_vec()
        } else {
            generate_palette(labels.len())
        };
        let mapping = labels.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Diverging scale for the correlation heatmap
// ---------------------------------------------------------------------------

const COOL: (f32, f32, f32) = (59.0, 76.0, 192.0);
const NEUTRAL: (f32, f32, f32) = (221.0, 221.0, 221.0);
const WARM: (f32, f32, f32) = (180.0, 4.0, 38.0);

fn linear((r, g, b): (f32, f32, f32)) -> LinSrgb {
    Srgb::new(r / 255.0, g / 255.0, b / 255.0).into_linear()
}

/// Blue for -1, grey for 0, red for +1, interpolated in linear RGB.
pub fn diverging(value: f64) -> Color32 {
    let t = value.clamp(-1.0, 1.0) as f32;
    let mixed = if t < 0.0 {
        linear(NEUTRAL).mix(linear(COOL), -t)
    } else {
        linear(NEUTRAL).mix(linear(WARM), t)
    };
    to_color32(Srgb::from_linear(mixed))
}

/// Black or white, whichever reads better on `fill`.
pub fn contrast_text(fill: Color32) -> Color32 {
    let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luma > 150.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(7);
        assert_eq!(p.len(), 7);
        assert_ne!(p[0], p[3]);
    }

    #[test]
    fn color_map_uses_series_for_few_labels() {
        let labels = vec!["Movie".to_string(), "Series".to_string()];
        let map = ColorMap::new(&labels);
        assert_eq!(map.color_for("Movie"), SERIES[0]);
        assert_eq!(map.color_for("Series"), SERIES[1]);
        assert_eq!(map.color_for("Other"), Color32::GRAY);
    }

    #[test]
    fn diverging_scale_endpoints() {
        assert_eq!(diverging(-1.0), Color32::from_rgb(59, 76, 192));
        assert_eq!(diverging(1.0), Color32::from_rgb(180, 4, 38));
        let mid = diverging(0.0);
        assert!(mid.r() >= 219 && mid.r() <= 221);
        assert_eq!(diverging(5.0), diverging(1.0));
    }

    #[test]
    fn modes_differ() {
        assert_ne!(Theme::dark().background, Theme::light().background);
        assert!(Theme::for_mode(true).light);
        assert_eq!(contrast_text(Color32::WHITE), Color32::BLACK);
    }
}

use crate::aspects::{AspectNature, AspectType};
use crate::rendering::primitives::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    // Canvas
    pub width: u32,
    pub height: u32,
    /// Degrees added to every angle before drawing
    pub rotation_offset: f32,

    // Radii ratios
    /// Outer ring as a fraction of half the shorter canvas side
    pub outer_radius_ratio: f32,
    /// Inner ring as a fraction of the outer ring
    pub inner_radius_ratio: f32,
    /// Sign glyphs, fraction of the outer ring
    pub sign_glyph_ratio: f32,
    /// Body glyphs, fraction of the inner ring
    pub body_radius_ratio: f32,
    pub ascendant_radius_ratio: f32,
    pub degree_label_ratio: f32,
    /// House cusp lines run from this fraction of the inner ring out to the ring
    pub house_cusp_ratio: f32,
    pub house_number_ratio: f32,

    // Ticks
    pub draw_ticks: bool,
    pub tick_ratio: f32,
    pub major_tick_ratio: f32,

    // Fonts
    pub glyph_font: String,
    pub text_font: String,
    pub sign_glyph_size: f32,
    pub house_number_size: f32,
    pub body_glyph_size: f32,
    pub degree_label_size: f32,

    // Colors, as hex strings
    pub color_background: String,
    pub color_foreground: String,
    pub aspect_colors: AspectColors,

    // Stroke widths
    pub stroke_rings: f32,
    pub stroke_lines: f32,
    pub stroke_aspects: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectColors {
    pub conjunction: String,
    pub harmonious: String,
    pub tense: String,
}

impl Default for AspectColors {
    fn default() -> Self {
        Self {
            conjunction: "#008000".to_string(),
            harmonious: "#0000ff".to_string(),
            tense: "#ff0000".to_string(),
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            rotation_offset: 0.0,

            outer_radius_ratio: 0.9,
            inner_radius_ratio: 0.65,
            sign_glyph_ratio: 0.95,
            body_radius_ratio: 0.8,
            ascendant_radius_ratio: 0.30,
            degree_label_ratio: 0.9,
            house_cusp_ratio: 0.45,
            house_number_ratio: 0.55,

            draw_ticks: true,
            tick_ratio: 0.97,
            major_tick_ratio: 0.95,

            glyph_font: "DejaVu Sans, Symbola, sans-serif".to_string(),
            text_font: "Arial, Helvetica, sans-serif".to_string(),
            sign_glyph_size: 24.0,
            house_number_size: 16.0,
            body_glyph_size: 20.0,
            degree_label_size: 12.0,

            color_background: "#ffffff".to_string(),
            color_foreground: "#000000".to_string(),
            aspect_colors: AspectColors::default(),

            stroke_rings: 2.0,
            stroke_lines: 1.0,
            stroke_aspects: 1.0,
        }
    }
}

impl RenderSettings {
    pub fn background(&self) -> Color {
        parse_color("color_background", &self.color_background, Color::WHITE)
    }

    pub fn foreground(&self) -> Color {
        parse_color("color_foreground", &self.color_foreground, Color::BLACK)
    }

    pub fn aspect_color(&self, aspect_type: AspectType) -> Color {
        let (name, hex) = match aspect_type.nature() {
            AspectNature::Neutral => ("conjunction", &self.aspect_colors.conjunction),
            AspectNature::Harmonious => ("harmonious", &self.aspect_colors.harmonious),
            AspectNature::Tense => ("tense", &self.aspect_colors.tense),
        };
        parse_color(name, hex, self.foreground())
    }
}

fn parse_color(name: &str, hex: &str, fallback: Color) -> Color {
    Color::from_hex(hex).unwrap_or_else(|| {
        log::warn!("Invalid color {:?} for {}, using {}", hex, name, fallback.to_hex());
        fallback
    })
}

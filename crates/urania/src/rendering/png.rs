use crate::rendering::generator::RenderError;
use crate::rendering::spec::ChartSpec;
use crate::rendering::svg::to_svg;
use resvg::tiny_skia;
use resvg::usvg;
use std::sync::Arc;

/// Rasterize a chart spec by rendering it to SVG and drawing that with resvg.
///
/// Glyphs come from the system font database; missing fonts leave text blank
/// rather than failing.
pub fn to_png(spec: &ChartSpec) -> Result<Vec<u8>, RenderError> {
    let svg = to_svg(spec);

    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    log::debug!("Loaded {} font faces for PNG output", fontdb.len());

    let options = usvg::Options {
        fontdb: Arc::new(fontdb),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(&svg, &options).map_err(|e| RenderError::Encode {
        message: format!("failed to parse SVG: {e}"),
    })?;

    let width = spec.width.ceil() as u32;
    let height = spec.height.ceil() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or(RenderError::InvalidCanvas {
        width,
        height,
    })?;

    let bg = spec.background_color;
    pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| RenderError::Encode {
        message: format!("failed to encode PNG: {e}"),
    })
}

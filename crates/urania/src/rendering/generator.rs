use crate::aspects::AspectType;
use crate::chart::{ChartPositions, WireChart};
use crate::ephemeris::Body;
use crate::rendering::primitives::{Point, Shape, Stroke, TextAnchor, TextRole};
use crate::rendering::settings::RenderSettings;
use crate::rendering::spec::ChartSpec;
use crate::zodiac::Sign;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Svg,
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "svg" => Ok(ImageFormat::Svg),
            "png" => Ok(ImageFormat::Png),
            other => Err(RenderError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Chart has no body positions to draw")]
    MissingPositions,

    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("Unsupported image format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Failed to encode image: {message}")]
    Encode { message: String },
}

/// Draws a chart wheel.
///
/// Layout produces a [`ChartSpec`]; encoding turns it into image bytes.
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    settings: RenderSettings,
}

/// A body ready to be placed on the wheel
struct Placed {
    label: String,
    glyph: String,
    degree: u8,
    angle: f32,
    point: Point,
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Render a resolved chart to image bytes.
    pub fn render(&self, chart: &ChartPositions, format: ImageFormat) -> Result<Vec<u8>, RenderError> {
        let spec = self.layout_chart(chart)?;
        self.encode(&spec, format)
    }

    /// Render a chart received in its JSON form.
    pub fn render_wire(&self, chart: &WireChart, format: ImageFormat) -> Result<Vec<u8>, RenderError> {
        let spec = self.layout(chart)?;
        self.encode(&spec, format)
    }

    /// Render on a canvas of the given size, overriding the configured one.
    pub fn render_sized(
        &self,
        chart: &ChartPositions,
        width: u32,
        height: u32,
        format: ImageFormat,
    ) -> Result<Vec<u8>, RenderError> {
        let sized = ChartRenderer::with_settings(RenderSettings {
            width,
            height,
            ..self.settings.clone()
        });
        sized.render(chart, format)
    }

    pub fn layout_chart(&self, chart: &ChartPositions) -> Result<ChartSpec, RenderError> {
        self.layout(&chart.to_wire())
    }

    /// Build the shape list for a chart.
    pub fn layout(&self, chart: &WireChart) -> Result<ChartSpec, RenderError> {
        let s = &self.settings;
        if s.width == 0 || s.height == 0 {
            return Err(RenderError::InvalidCanvas {
                width: s.width,
                height: s.height,
            });
        }
        if chart.bodies.is_empty() {
            return Err(RenderError::MissingPositions);
        }

        let mut spec = ChartSpec::new(s.width as f32, s.height as f32);
        spec.rotation_offset = s.rotation_offset;
        spec.background_color = s.background();

        let center = spec.center;
        let outer = center.x.min(center.y) * s.outer_radius_ratio;
        let inner = outer * s.inner_radius_ratio;
        let fg = s.foreground();
        let ring = Stroke {
            color: fg,
            width: s.stroke_rings,
        };
        let line = Stroke {
            color: fg,
            width: s.stroke_lines,
        };

        for radius in [outer, inner] {
            spec.shapes.push(Shape::Circle {
                center,
                radius,
                fill: None,
                stroke: Some(ring),
            });
        }

        let cusps = house_cusps(chart);
        let house_radius = (outer + inner) / 2.0;
        for sign in Sign::ALL {
            let start = self.angle(sign.start_longitude() as f32);
            let mid = start + 15.0;

            spec.shapes.push(Shape::Line {
                from: Point::polar(center, inner, start),
                to: Point::polar(center, outer, start),
                stroke: line,
            });
            spec.shapes.push(Shape::Text {
                position: Point::polar(center, outer * s.sign_glyph_ratio, mid),
                content: sign.glyph().to_string(),
                role: TextRole::SignGlyph,
                font_family: s.glyph_font.clone(),
                size: s.sign_glyph_size,
                color: fg,
                anchor: TextAnchor::Middle,
            });
            if cusps.is_none() {
                spec.shapes.push(Shape::Text {
                    position: Point::polar(center, house_radius, mid),
                    content: (sign.index() + 1).to_string(),
                    role: TextRole::HouseNumber,
                    font_family: s.text_font.clone(),
                    size: s.house_number_size,
                    color: fg,
                    anchor: TextAnchor::Middle,
                });
            }

            if s.draw_ticks {
                for step in 0..30u8 {
                    let ratio = if step % 5 == 0 {
                        s.major_tick_ratio
                    } else {
                        s.tick_ratio
                    };
                    let angle = start + f32::from(step);
                    spec.shapes.push(Shape::Line {
                        from: Point::polar(center, outer, angle),
                        to: Point::polar(center, outer * ratio, angle),
                        stroke: line,
                    });
                }
            }
        }

        if let Some(cusps) = &cusps {
            for (i, (house, longitude)) in cusps.iter().enumerate() {
                let start = self.angle(*longitude);
                let (_, next) = cusps[(i + 1) % cusps.len()];
                let span = (next - longitude).rem_euclid(360.0);
                let mid = start + span / 2.0;

                spec.shapes.push(Shape::Line {
                    from: Point::polar(center, inner * s.house_cusp_ratio, start),
                    to: Point::polar(center, inner, start),
                    stroke: line,
                });
                spec.shapes.push(Shape::Text {
                    position: Point::polar(center, inner * s.house_number_ratio, mid),
                    content: house.to_string(),
                    role: TextRole::HouseNumber,
                    font_family: s.text_font.clone(),
                    size: s.house_number_size,
                    color: fg,
                    anchor: TextAnchor::Middle,
                });
                spec.metadata.houses_drawn += 1;
            }
        }

        let placed = self.place_bodies(chart, center, inner, &mut spec);
        let by_label: HashMap<&str, &Placed> =
            placed.iter().map(|p| (p.label.as_str(), p)).collect();

        for p in &placed {
            spec.shapes.push(Shape::Text {
                position: p.point,
                content: p.glyph.clone(),
                role: TextRole::BodyGlyph,
                font_family: s.glyph_font.clone(),
                size: s.body_glyph_size,
                color: fg,
                anchor: TextAnchor::Middle,
            });
            spec.shapes.push(Shape::Text {
                position: Point::polar(center, inner * s.degree_label_ratio, p.angle),
                content: format!("{}°", p.degree),
                role: TextRole::DegreeLabel,
                font_family: s.text_font.clone(),
                size: s.degree_label_size,
                color: fg,
                anchor: TextAnchor::Middle,
            });
        }

        for aspect in &chart.aspects {
            let endpoints = (
                by_label.get(aspect.planet1.as_str()),
                by_label.get(aspect.planet2.as_str()),
                AspectType::from_str(&aspect.aspect),
            );
            match endpoints {
                (Some(a), Some(b), Ok(aspect_type)) => {
                    spec.shapes.push(Shape::AspectLine {
                        from: a.point,
                        to: b.point,
                        aspect_type,
                        color: s.aspect_color(aspect_type),
                        width: s.stroke_aspects,
                    });
                    spec.metadata.aspects_drawn += 1;
                }
                _ => {
                    log::warn!(
                        "Skipping aspect {} {} {}: endpoint or type not drawable",
                        aspect.planet1,
                        aspect.aspect,
                        aspect.planet2
                    );
                    spec.metadata.aspects_skipped += 1;
                }
            }
        }

        log::debug!(
            "Laid out chart: {} shapes, {} bodies, {} skipped",
            spec.shapes.len(),
            spec.metadata.bodies_drawn,
            spec.metadata.skipped
        );
        Ok(spec)
    }

    fn place_bodies(
        &self,
        chart: &WireChart,
        center: Point,
        inner: f32,
        spec: &mut ChartSpec,
    ) -> Vec<Placed> {
        let s = &self.settings;
        let mut placed = Vec::new();

        for (label, pos) in &chart.bodies {
            let sign = match Sign::from_str(&pos.sign) {
                Ok(sign) => sign,
                Err(e) => {
                    log::warn!("Skipping {}: {}", label, e);
                    spec.metadata.skipped += 1;
                    continue;
                }
            };
            let body = Body::from_str(label).ok();
            let ratio = if body == Some(Body::Ascendant) {
                s.ascendant_radius_ratio
            } else {
                s.body_radius_ratio
            };
            let angle = self.angle(sign.start_longitude() as f32 + f32::from(pos.degree));

            placed.push(Placed {
                label: label.clone(),
                glyph: body.map(|b| b.glyph().to_string()).unwrap_or_else(|| label.clone()),
                degree: pos.degree,
                angle,
                point: Point::polar(center, inner * ratio, angle),
            });
            spec.metadata.bodies_drawn += 1;
        }

        placed
    }

    fn angle(&self, longitude: f32) -> f32 {
        longitude + self.settings.rotation_offset
    }

    /// Encode a laid-out chart.
    pub fn encode(&self, spec: &ChartSpec, format: ImageFormat) -> Result<Vec<u8>, RenderError> {
        match format {
            ImageFormat::Svg => Ok(crate::rendering::svg::to_svg(spec).into_bytes()),
            #[cfg(feature = "png")]
            ImageFormat::Png => crate::rendering::png::to_png(spec),
            #[cfg(not(feature = "png"))]
            ImageFormat::Png => Err(RenderError::UnsupportedFormat {
                format: "png (built without the `png` feature)".to_string(),
            }),
        }
    }
}

/// House numbers and cusp longitudes in house order, or `None` when the chart
/// carries no houses or any cusp sign is unreadable.
fn house_cusps(chart: &WireChart) -> Option<Vec<(u8, f32)>> {
    if chart.houses.is_empty() {
        return None;
    }
    let mut cusps = Vec::with_capacity(chart.houses.len());
    for house in &chart.houses {
        match Sign::from_str(&house.sign) {
            Ok(sign) => cusps.push((
                house.house,
                sign.start_longitude() as f32
                    + f32::from(house.degree)
                    + f32::from(house.minutes) / 60.0,
            )),
            Err(e) => {
                log::warn!("House {} unreadable ({}), numbering by sign", house.house, e);
                return None;
            }
        }
    }
    cusps.sort_by_key(|(house, _)| *house);
    Some(cusps)
}

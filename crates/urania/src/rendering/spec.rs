use crate::rendering::primitives::{Color, Point, Shape, TextRole};
use serde::{Deserialize, Serialize};

/// What went into a chart spec
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartMetadata {
    pub bodies_drawn: usize,
    /// Bodies left out because their sign could not be read
    pub skipped: usize,
    /// House cusps taken from the chart; zero when houses are numbered by sign
    pub houses_drawn: usize,
    pub aspects_drawn: usize,
    pub aspects_skipped: usize,
}

/// Chart specification - declarative description of chart to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub width: f32,
    pub height: f32,
    pub center: Point,
    pub rotation_offset: f32,
    pub background_color: Color,
    pub shapes: Vec<Shape>,
    pub metadata: ChartMetadata,
}

impl ChartSpec {
    /// Create a new empty chart spec
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            center: Point {
                x: width / 2.0,
                y: height / 2.0,
            },
            rotation_offset: 0.0,
            background_color: Color::WHITE,
            shapes: Vec::new(),
            metadata: ChartMetadata::default(),
        }
    }

    pub fn count_text(&self, role: TextRole) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Text { role: r, .. } if *r == role))
            .count()
    }

    pub fn aspect_lines(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::AspectLine { .. }))
            .count()
    }
}

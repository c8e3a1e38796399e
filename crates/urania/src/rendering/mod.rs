pub mod generator;
pub mod primitives;
pub mod settings;
pub mod spec;
pub mod svg;

#[cfg(feature = "png")]
pub mod png;

pub use generator::{ChartRenderer, ImageFormat, RenderError};
pub use primitives::{Color, Point, Shape, Stroke, TextAnchor, TextRole};
pub use settings::{AspectColors, RenderSettings};
pub use spec::{ChartMetadata, ChartSpec};

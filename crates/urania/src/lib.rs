//! Natal chart engine: planetary positions, zodiac placement, aspects and
//! chart wheel rendering.

pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod geocoding;
pub mod rendering;
pub mod service;
pub mod zodiac;

pub use aspects::{detect_aspects, Aspect, AspectDetector, AspectSettings, AspectType};
pub use chart::{ChartPositions, PositionResolver, PositionSource, ResolutionError, WireChart};
pub use ephemeris::{AnalyticEphemeris, Body, Ephemeris, EphemerisError, GeoCoordinate};
pub use geocoding::{Gazetteer, GeoMatch, Geocoder};
pub use rendering::{ChartRenderer, ImageFormat, RenderError, RenderSettings};
pub use service::ChartService;
pub use zodiac::{Sign, ZodiacMapper, ZodiacPosition};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chart points tracked by the resolver.
///
/// Ordering follows declaration order, which is also the order bodies are listed
/// in serialized charts and in aspect pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Ascendant,
}

impl Body {
    /// Bodies whose longitude comes from the ephemeris provider.
    pub const PLANETS: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub const ALL: [Body; 11] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::Ascendant,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::Ascendant => "Ascendant",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Body::Sun => "☉",
            Body::Moon => "☽",
            Body::Mercury => "☿",
            Body::Venus => "♀",
            Body::Mars => "♂",
            Body::Jupiter => "♃",
            Body::Saturn => "♄",
            Body::Uranus => "♅",
            Body::Neptune => "♆",
            Body::Pluto => "♇",
            Body::Ascendant => "AC",
        }
    }

    /// Offset from the Sun used when the ephemeris cannot place this body.
    ///
    /// `None` for the Sun, which falls back to the mean solar longitude instead,
    /// and for the Ascendant, which is never looked up.
    pub fn fallback_offset(self) -> Option<f64> {
        match self {
            Body::Mercury => Some(0.0),
            Body::Venus => Some(30.0),
            Body::Mars => Some(60.0),
            Body::Jupiter => Some(90.0),
            Body::Saturn => Some(120.0),
            Body::Uranus => Some(150.0),
            Body::Neptune => Some(180.0),
            Body::Pluto => Some(210.0),
            Body::Moon => Some(240.0),
            Body::Sun | Body::Ascendant => None,
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Body::ALL
            .iter()
            .copied()
            .find(|body| body.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown body: {}", s))
    }
}

/// Observer location in decimal degrees (east longitude positive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Create a coordinate, rejecting out-of-range or non-finite values
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        if lat_ok && lon_ok {
            Some(Self {
                latitude,
                longitude,
            })
        } else {
            None
        }
    }
}

use crate::zodiac::ZodiacPosition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Chart in its client-facing JSON form:
///
/// ```json
/// { "Sun": {"sign": "Aries", "degree": 15, "minutes": 0},
///   "Houses": [{"house": 1, "sign": "Leo", "degree": 3, "minutes": 12}],
///   "Aspects": [{"planet1": "Moon", "planet2": "Sun", "aspect": "Trine", "orb": "0.4"}] }
/// ```
///
/// Sign names are kept as strings so charts from other producers can still be
/// read; unknown names are dealt with by the consumer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireChart {
    #[serde(flatten)]
    pub bodies: BTreeMap<String, WirePosition>,
    #[serde(rename = "Houses", default)]
    pub houses: Vec<WireHouse>,
    #[serde(rename = "Aspects", default)]
    pub aspects: Vec<WireAspect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePosition {
    pub sign: String,
    pub degree: u8,
    pub minutes: u8,
}

impl From<ZodiacPosition> for WirePosition {
    fn from(pos: ZodiacPosition) -> Self {
        Self {
            sign: pos.sign.name().to_string(),
            degree: pos.degree,
            minutes: pos.minute,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireHouse {
    pub house: u8,
    pub sign: String,
    pub degree: u8,
    pub minutes: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireAspect {
    pub planet1: String,
    pub planet2: String,
    pub aspect: String,
    /// One decimal, e.g. "2.3"
    pub orb: String,
}

impl WireChart {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

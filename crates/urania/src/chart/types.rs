use crate::aspects::Aspect;
use crate::chart::houses::equal_houses;
use crate::chart::wire::{WireAspect, WireChart, WireHouse, WirePosition};
use crate::ephemeris::{Body, GeoCoordinate};
use crate::zodiac::{normalize_longitude, position_of, ZodiacPosition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a body's longitude came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionSource {
    Ephemeris,
    /// Degraded estimate used after the ephemeris failed for this body
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    /// 1..=12
    pub house: u8,
    pub position: ZodiacPosition,
    pub longitude: f64,
}

/// Inputs a chart was resolved from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthContext {
    pub instant: DateTime<Utc>,
    pub coordinate: GeoCoordinate,
    pub timezone: String,
    pub place: String,
}

/// A resolved natal chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPositions {
    pub bodies: BTreeMap<Body, ZodiacPosition>,
    /// Exact longitudes in [0, 360), used for aspects and drawing
    pub longitudes: BTreeMap<Body, f64>,
    pub sources: BTreeMap<Body, PositionSource>,
    pub houses: Vec<HouseCusp>,
    pub aspects: Vec<Aspect>,
    pub context: Option<BirthContext>,
}

impl ChartPositions {
    /// Build a chart from exact longitudes. Houses are derived from the
    /// Ascendant when one is present.
    pub fn from_longitudes(
        longitudes: BTreeMap<Body, f64>,
        sources: BTreeMap<Body, PositionSource>,
    ) -> Self {
        let longitudes: BTreeMap<Body, f64> = longitudes
            .into_iter()
            .map(|(body, lon)| (body, normalize_longitude(lon)))
            .collect();
        let bodies = longitudes
            .iter()
            .map(|(body, lon)| (*body, position_of(*lon)))
            .collect();
        let houses = longitudes
            .get(&Body::Ascendant)
            .map(|asc| equal_houses(*asc))
            .unwrap_or_default();

        Self {
            bodies,
            longitudes,
            sources,
            houses,
            aspects: Vec::new(),
            context: None,
        }
    }

    pub fn with_aspects(mut self, aspects: Vec<Aspect>) -> Self {
        self.aspects = aspects;
        self
    }

    pub fn with_context(mut self, context: BirthContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn position(&self, body: Body) -> Option<ZodiacPosition> {
        self.bodies.get(&body).copied()
    }

    pub fn longitude(&self, body: Body) -> Option<f64> {
        self.longitudes.get(&body).copied()
    }

    pub fn source(&self, body: Body) -> Option<PositionSource> {
        self.sources.get(&body).copied()
    }

    /// Bodies whose longitude was estimated
    pub fn fallback_bodies(&self) -> Vec<Body> {
        self.sources
            .iter()
            .filter(|(_, source)| **source == PositionSource::Fallback)
            .map(|(body, _)| *body)
            .collect()
    }

    /// Convert to the stable JSON shape exchanged with clients.
    pub fn to_wire(&self) -> WireChart {
        let bodies = self
            .bodies
            .iter()
            .map(|(body, pos)| (body.name().to_string(), WirePosition::from(*pos)))
            .collect();
        let houses = self
            .houses
            .iter()
            .map(|cusp| WireHouse {
                house: cusp.house,
                sign: cusp.position.sign.name().to_string(),
                degree: cusp.position.degree,
                minutes: cusp.position.minute,
            })
            .collect();
        let aspects = self
            .aspects
            .iter()
            .map(|aspect| WireAspect {
                planet1: aspect.body_a.name().to_string(),
                planet2: aspect.body_b.name().to_string(),
                aspect: aspect.aspect_type.name().to_string(),
                orb: format!("{:.1}", aspect.orb),
            })
            .collect();

        WireChart {
            bodies,
            houses,
            aspects,
        }
    }
}

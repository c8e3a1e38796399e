pub mod gazetteer;
pub mod regions;

pub use gazetteer::{CityRecord, Gazetteer, GazetteerLoadError};

use crate::ephemeris::GeoCoordinate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result count used by city search when the caller has no preference
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// A resolved place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoMatch {
    pub coordinate: GeoCoordinate,
    /// IANA timezone id, e.g. "America/Chicago"
    pub timezone: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeError {
    #[error("Place not found: {locality}, {region}")]
    PlaceNotFound { locality: String, region: String },

    #[error("Unknown region: {region}")]
    UnknownRegion { region: String },
}

/// Place-name resolution.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a (locality, region) pair to coordinates and a timezone.
    async fn resolve(&self, locality: &str, region: &str) -> Result<GeoMatch, GeocodeError>;

    /// Candidate places whose name contains `query`, most populous first.
    async fn search(&self, query: &str, limit: usize) -> Vec<CityRecord>;
}

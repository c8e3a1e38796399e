use crate::ephemeris::time;
use crate::ephemeris::types::{Body, GeoCoordinate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {body} at {instant}: {message}")]
    CalculationFailed {
        body: Body,
        instant: DateTime<Utc>,
        message: String,
    },
    #[error("{body} is not provided by this ephemeris")]
    UnsupportedBody { body: Body },
    #[error("Lookup for {body} timed out after {millis} ms")]
    Timeout { body: Body, millis: u64 },
}

/// Source of body positions.
///
/// Implementations may fail per body; callers decide how to degrade.
#[async_trait]
pub trait Ephemeris: Send + Sync {
    /// Ecliptic longitude of `body` in degrees as seen from `observer`.
    async fn longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        observer: GeoCoordinate,
    ) -> Result<f64, EphemerisError>;

    /// Greenwich sidereal time in hours.
    fn sidereal_time(&self, instant: DateTime<Utc>) -> f64 {
        time::gmst_hours(instant)
    }

    fn name(&self) -> &str;
}

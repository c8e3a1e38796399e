use crate::geocoding::GeocodeError;
use thiserror::Error;

/// Failures that abort chart resolution. Per-body ephemeris failures are not
/// here: they are absorbed by the fallback estimate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolutionError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid place format {place:?}: expected \"City, Region\"")]
    InvalidPlaceFormat { place: String },

    #[error("Place lookup failed: {locality}, {region} not found")]
    PlaceNotFound { locality: String, region: String },

    #[error("Timezone lookup failed: unknown region {region:?}")]
    UnknownTimezone { region: String },

    #[error("Invalid date/time {input:?}: {reason}")]
    InvalidDateTime { input: String, reason: String },
}

impl From<GeocodeError> for ResolutionError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::PlaceNotFound { locality, region } => {
                ResolutionError::PlaceNotFound { locality, region }
            }
            GeocodeError::UnknownRegion { region } => ResolutionError::UnknownTimezone { region },
        }
    }
}

pub mod analytic;
pub mod provider;
pub mod time;
pub mod types;

#[cfg(feature = "swisseph")]
pub mod adapter;

pub use analytic::AnalyticEphemeris;
pub use provider::{Ephemeris, EphemerisError};
pub use types::{Body, GeoCoordinate};

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisAdapter;

use crate::ephemeris::provider::{Ephemeris, EphemerisError};
use crate::ephemeris::time::julian_day;
use crate::ephemeris::types::{Body, GeoCoordinate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;
use swisseph::swe::calc_ut;

// Swiss Ephemeris planet IDs: SUN=0, MOON=1, MERCURY=2 ... PLUTO=9
const PLANET_IDS: &[(Body, u32)] = &[
    (Body::Sun, 0),
    (Body::Moon, 1),
    (Body::Mercury, 2),
    (Body::Venus, 3),
    (Body::Mars, 4),
    (Body::Jupiter, 5),
    (Body::Saturn, 6),
    (Body::Uranus, 7),
    (Body::Neptune, 8),
    (Body::Pluto, 9),
];

/// FLG_SWIEPH; the library drops to its Moshier theory when data files are missing.
const FLG_SWIEPH: u32 = 2;

/// Swiss Ephemeris adapter implementation.
///
/// The data path is validated and reported but not handed to the C library,
/// which searches its compiled-in default (overridable with `SE_EPHE_PATH` in
/// the process environment). Without data files it falls back to the Moshier theory.
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    // The C library keeps global state; serialize calls into it.
    lock: Mutex<()>,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        log::info!(
            "Swiss Ephemeris data path {} checked; the library reads its own default or SE_EPHE_PATH",
            path.display()
        );
        Ok(Self {
            ephemeris_path: path,
            lock: Mutex::new(()),
        })
    }

    /// The validated data path
    pub fn ephemeris_path(&self) -> &PathBuf {
        &self.ephemeris_path
    }

    /// Calculate the tropical longitude of a single body
    pub fn calc_longitude(&self, body: Body, jd: f64) -> Result<f64, EphemerisError> {
        let code = PLANET_IDS
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, code)| *code)
            .ok_or(EphemerisError::UnsupportedBody { body })?;

        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let result = calc_ut(jd, code, FLG_SWIEPH).map_err(|e| EphemerisError::CalculationFailed {
            body,
            instant: julian_day_to_datetime(jd),
            message: format!("Swiss Ephemeris error: {}", e),
        })?;

        Ok(result.out[0].rem_euclid(360.0))
    }
}

#[async_trait]
impl Ephemeris for SwissEphemerisAdapter {
    async fn longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        _observer: GeoCoordinate,
    ) -> Result<f64, EphemerisError> {
        self.calc_longitude(body, julian_day(instant))
    }

    fn name(&self) -> &str {
        "swisseph"
    }
}

fn julian_day_to_datetime(jd: f64) -> DateTime<Utc> {
    let seconds = (jd - 2_440_587.5) * 86_400.0;
    DateTime::from_timestamp(seconds.floor() as i64, 0).unwrap_or_default()
}

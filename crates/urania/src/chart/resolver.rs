use crate::chart::error::ResolutionError;
use crate::chart::houses::ascendant_longitude;
use crate::chart::time::to_instant;
use crate::chart::types::{BirthContext, ChartPositions, PositionSource};
use crate::ephemeris::time::{julian_day, mean_solar_longitude};
use crate::ephemeris::{Body, Ephemeris, EphemerisError, GeoCoordinate};
use crate::geocoding::Geocoder;
use crate::zodiac::normalize_longitude;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// Turns (date, time, place) into a full set of chart positions.
pub struct PositionResolver {
    ephemeris: Arc<dyn Ephemeris>,
    geocoder: Arc<dyn Geocoder>,
    lookup_timeout: Option<Duration>,
}

impl PositionResolver {
    pub fn new(ephemeris: Arc<dyn Ephemeris>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            ephemeris,
            geocoder,
            lookup_timeout: None,
        }
    }

    /// Bound each ephemeris lookup; an expired lookup falls back like any other failure.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = Some(timeout);
        self
    }

    pub fn geocoder(&self) -> &Arc<dyn Geocoder> {
        &self.geocoder
    }

    /// Resolve a birth moment and place ("City, Region") into chart positions.
    pub async fn resolve(
        &self,
        date: &str,
        time: &str,
        place: &str,
    ) -> Result<ChartPositions, ResolutionError> {
        let started = Instant::now();

        for (field, value) in [("date", date), ("time", time), ("place", place)] {
            if value.trim().is_empty() {
                return Err(ResolutionError::MissingField { field });
            }
        }

        let (locality, region) = parse_place(place)?;
        log::debug!("Resolving place {:?} / {:?}", locality, region);
        let location = self.geocoder.resolve(&locality, &region).await?;
        log::debug!(
            "Resolved {} to ({}, {}) in {}",
            location.display_name,
            location.coordinate.latitude,
            location.coordinate.longitude,
            location.timezone
        );

        let instant = to_instant(date, time, &location.timezone)?;
        log::debug!("Birth instant {}", instant.to_rfc3339());

        let chart = self
            .positions_at(instant, location.coordinate)
            .await
            .with_context(BirthContext {
                instant,
                coordinate: location.coordinate,
                timezone: location.timezone,
                place: location.display_name,
            });

        log::info!(
            "Resolved chart for {} {} {} in {:?} ({} fallback)",
            date,
            time,
            place,
            started.elapsed(),
            chart.fallback_bodies().len()
        );
        Ok(chart)
    }

    /// Compute positions for a known instant and observer. Never fails: bodies the
    /// ephemeris cannot supply get fallback estimates.
    pub async fn positions_at(
        &self,
        instant: DateTime<Utc>,
        observer: GeoCoordinate,
    ) -> ChartPositions {
        let lookups = self.lookup_all(instant, observer).await;
        let (mut longitudes, mut sources) = resolve_with_fallback(lookups, julian_day(instant));

        let gmst = self.ephemeris.sidereal_time(instant);
        longitudes.insert(Body::Ascendant, ascendant_longitude(gmst, observer.longitude));
        sources.insert(Body::Ascendant, PositionSource::Ephemeris);

        ChartPositions::from_longitudes(longitudes, sources)
    }

    async fn lookup_all(
        &self,
        instant: DateTime<Utc>,
        observer: GeoCoordinate,
    ) -> BTreeMap<Body, Result<f64, EphemerisError>> {
        let mut set = JoinSet::new();
        for body in Body::PLANETS {
            let ephemeris = Arc::clone(&self.ephemeris);
            let timeout = self.lookup_timeout;
            set.spawn(async move {
                let lookup = ephemeris.longitude(body, instant, observer);
                let result = match timeout {
                    Some(limit) => tokio::time::timeout(limit, lookup)
                        .await
                        .unwrap_or_else(|_| {
                            Err(EphemerisError::Timeout {
                                body,
                                millis: limit.as_millis() as u64,
                            })
                        }),
                    None => lookup.await,
                };
                (body, result)
            });
        }

        let mut results = BTreeMap::new();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((body, result)) => {
                    results.insert(body, result);
                }
                Err(e) => log::warn!("Ephemeris lookup task failed: {}", e),
            }
        }

        // A panicked task loses its body; report it as a failure so it still falls back.
        for body in Body::PLANETS {
            results.entry(body).or_insert_with(|| {
                Err(EphemerisError::CalculationFailed {
                    body,
                    instant,
                    message: "lookup task aborted".to_string(),
                })
            });
        }
        results
    }
}

/// Split "City, Region" into its two trimmed parts.
pub fn parse_place(place: &str) -> Result<(String, String), ResolutionError> {
    let parts: Vec<&str> = place.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [locality, region] if !locality.is_empty() && !region.is_empty() => {
            Ok((locality.to_string(), region.to_string()))
        }
        _ => Err(ResolutionError::InvalidPlaceFormat {
            place: place.to_string(),
        }),
    }
}

/// Fold per-body lookup results into longitudes, substituting estimates for failures.
///
/// The Sun falls back to its mean longitude at `jd`; every other body is placed at a
/// fixed offset from the Sun (see [`Body::fallback_offset`]).
pub fn resolve_with_fallback(
    lookups: BTreeMap<Body, Result<f64, EphemerisError>>,
    jd: f64,
) -> (BTreeMap<Body, f64>, BTreeMap<Body, PositionSource>) {
    let mut longitudes = BTreeMap::new();
    let mut sources = BTreeMap::new();

    let sun = match lookups.get(&Body::Sun) {
        Some(Ok(lon)) => {
            sources.insert(Body::Sun, PositionSource::Ephemeris);
            normalize_longitude(*lon)
        }
        Some(Err(e)) => {
            log::warn!("Sun lookup failed, using mean longitude: {}", e);
            sources.insert(Body::Sun, PositionSource::Fallback);
            mean_solar_longitude(jd)
        }
        None => {
            log::warn!("Sun lookup missing, using mean longitude");
            sources.insert(Body::Sun, PositionSource::Fallback);
            mean_solar_longitude(jd)
        }
    };
    longitudes.insert(Body::Sun, sun);

    for (body, result) in lookups {
        if body == Body::Sun {
            continue;
        }
        let Some(offset) = body.fallback_offset() else {
            log::warn!("No fallback for {}, dropping it", body);
            continue;
        };
        let (lon, source) = match result {
            Ok(lon) => (normalize_longitude(lon), PositionSource::Ephemeris),
            Err(e) => {
                log::warn!("{} lookup failed, estimating from the Sun: {}", body, e);
                (normalize_longitude(sun + offset), PositionSource::Fallback)
            }
        };
        longitudes.insert(body, lon);
        sources.insert(body, source);
    }

    (longitudes, sources)
}

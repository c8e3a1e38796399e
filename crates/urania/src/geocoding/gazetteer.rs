use crate::ephemeris::GeoCoordinate;
use crate::geocoding::regions::{REGION_NAMES, REGION_TIMEZONES};
use crate::geocoding::{GeoMatch, GeocodeError, Geocoder};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

const BUILTIN_CITIES: &str = include_str!("../../data/us_cities.json");

/// One row of the city table.
///
/// Coordinates may be stored either as numbers or as numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub name: String,
    #[serde(rename = "state_code", alias = "region")]
    pub region: String,
    #[serde(rename = "lat", deserialize_with = "coordinate_value")]
    pub latitude: f64,
    #[serde(rename = "lng", deserialize_with = "coordinate_value")]
    pub longitude: f64,
    #[serde(default)]
    pub population: u64,
}

impl CityRecord {
    /// "Austin, TX"
    pub fn full_name(&self) -> String {
        format!("{}, {}", self.name, self.region)
    }

    pub fn coordinate(&self) -> Option<GeoCoordinate> {
        GeoCoordinate::new(self.latitude, self.longitude)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn coordinate_value<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("bad coordinate {:?}: {}", s, e))),
    }
}

/// Region tables as stored in a TOML file:
///
/// ```toml
/// [timezones]
/// TX = "America/Chicago"
///
/// [names]
/// texas = "TX"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RegionFile {
    timezones: HashMap<String, String>,
    names: HashMap<String, String>,
}

#[derive(Debug, Error)]
pub enum GazetteerLoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed city table {path}: {source}")]
    Cities {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed region table {path}: {source}")]
    Regions {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Region {region} maps to unknown timezone {timezone:?}")]
    InvalidTimezone { region: String, timezone: String },

    #[error("City {city} has out-of-range coordinates ({latitude}, {longitude})")]
    InvalidCoordinate {
        city: String,
        latitude: f64,
        longitude: f64,
    },
}

/// Static, in-memory geocoder: a city table plus region -> timezone tables.
///
/// Immutable after construction; safe to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    cities: Vec<CityRecord>,
    timezones: HashMap<String, String>,
    region_names: HashMap<String, String>,
}

impl Gazetteer {
    /// The bundled US city table with the built-in state timezone table.
    pub fn builtin() -> Result<Self, GazetteerLoadError> {
        let cities: Vec<CityRecord> =
            serde_json::from_str(BUILTIN_CITIES).map_err(|source| GazetteerLoadError::Cities {
                path: PathBuf::from("<builtin>"),
                source,
            })?;
        Self::new(cities, REGION_TIMEZONES.clone(), REGION_NAMES.clone())
    }

    /// Load a city table (JSON array) and optionally a region table (TOML).
    ///
    /// Without a region file the built-in US tables are used.
    pub fn from_files(
        cities_path: &Path,
        regions_path: Option<&Path>,
    ) -> Result<Self, GazetteerLoadError> {
        let raw = read_file(cities_path)?;
        let cities: Vec<CityRecord> =
            serde_json::from_str(&raw).map_err(|source| GazetteerLoadError::Cities {
                path: cities_path.to_path_buf(),
                source,
            })?;

        let (timezones, region_names) = match regions_path {
            Some(path) => {
                let raw = read_file(path)?;
                let file: RegionFile =
                    toml::from_str(&raw).map_err(|source| GazetteerLoadError::Regions {
                        path: path.to_path_buf(),
                        source,
                    })?;
                (file.timezones, file.names)
            }
            None => (REGION_TIMEZONES.clone(), REGION_NAMES.clone()),
        };

        log::info!(
            "Loaded gazetteer from {}: {} cities",
            cities_path.display(),
            cities.len()
        );
        Self::new(cities, timezones, region_names)
    }

    /// Build from in-memory tables. Region codes are upper-cased, names lower-cased,
    /// and every timezone id is checked against the IANA database.
    pub fn new(
        cities: Vec<CityRecord>,
        timezones: HashMap<String, String>,
        region_names: HashMap<String, String>,
    ) -> Result<Self, GazetteerLoadError> {
        for (region, timezone) in &timezones {
            if chrono_tz::Tz::from_str(timezone).is_err() {
                return Err(GazetteerLoadError::InvalidTimezone {
                    region: region.clone(),
                    timezone: timezone.clone(),
                });
            }
        }
        for city in &cities {
            if city.coordinate().is_none() {
                return Err(GazetteerLoadError::InvalidCoordinate {
                    city: city.full_name(),
                    latitude: city.latitude,
                    longitude: city.longitude,
                });
            }
        }

        let cities = cities
            .into_iter()
            .map(|mut c| {
                c.region = c.region.trim().to_uppercase();
                c
            })
            .collect();
        let timezones = timezones
            .into_iter()
            .map(|(k, v)| (k.trim().to_uppercase(), v))
            .collect();
        let region_names = region_names
            .into_iter()
            .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_uppercase()))
            .collect();

        Ok(Self {
            cities,
            timezones,
            region_names,
        })
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Normalize a region designator (code or full name, any case) to its code.
    pub fn region_code(&self, region: &str) -> Option<String> {
        let trimmed = region.trim();
        let code = trimmed.to_uppercase();
        if self.timezones.contains_key(&code) {
            return Some(code);
        }
        self.region_names
            .get(&trimmed.to_lowercase())
            .filter(|code| self.timezones.contains_key(*code))
            .cloned()
    }

    pub fn timezone_for(&self, region: &str) -> Option<&str> {
        let code = self.region_code(region)?;
        self.timezones.get(&code).map(String::as_str)
    }

    /// Exact (case-insensitive) lookup; the most populous match wins.
    pub fn lookup(&self, locality: &str, region: &str) -> Result<GeoMatch, GeocodeError> {
        let code = self
            .region_code(region)
            .ok_or_else(|| GeocodeError::UnknownRegion {
                region: region.trim().to_string(),
            })?;
        let timezone = self.timezones.get(&code).cloned().ok_or_else(|| {
            GeocodeError::UnknownRegion {
                region: region.trim().to_string(),
            }
        })?;

        let wanted = locality.trim();
        let city = self
            .cities
            .iter()
            .filter(|c| c.region == code && c.name.eq_ignore_ascii_case(wanted))
            .max_by_key(|c| c.population)
            .ok_or_else(|| GeocodeError::PlaceNotFound {
                locality: wanted.to_string(),
                region: code.clone(),
            })?;

        let coordinate = city.coordinate().ok_or_else(|| GeocodeError::PlaceNotFound {
            locality: wanted.to_string(),
            region: code.clone(),
        })?;

        Ok(GeoMatch {
            coordinate,
            timezone,
            display_name: city.full_name(),
        })
    }

    /// Case-insensitive substring search over city names, most populous first.
    pub fn find(&self, query: &str, limit: usize) -> Vec<CityRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<&CityRecord> = self
            .cities
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect();
        hits.sort_by(|a, b| {
            b.population
                .cmp(&a.population)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.region.cmp(&b.region))
        });
        hits.into_iter().take(limit).cloned().collect()
    }
}

#[async_trait]
impl Geocoder for Gazetteer {
    async fn resolve(&self, locality: &str, region: &str) -> Result<GeoMatch, GeocodeError> {
        self.lookup(locality, region)
    }

    async fn search(&self, query: &str, limit: usize) -> Vec<CityRecord> {
        self.find(query, limit)
    }
}

fn read_file(path: &Path) -> Result<String, GazetteerLoadError> {
    fs::read_to_string(path).map_err(|source| GazetteerLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_accept_strings_and_numbers() {
        let rows: Vec<CityRecord> = serde_json::from_str(
            r#"[{"name":"A","state_code":"TX","lat":"30.5","lng":-97.1},
                {"name":"B","state_code":"tx","lat":31,"lng":" -96.0 "}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].latitude, 30.5);
        assert_eq!(rows[1].longitude, -96.0);
        assert_eq!(rows[1].population, 0);
    }

    #[test]
    fn test_builtin_table_loads() {
        let gazetteer = Gazetteer::builtin().unwrap();
        assert!(!gazetteer.is_empty());
        assert_eq!(gazetteer.timezone_for("hi"), Some("Pacific/Honolulu"));
        assert_eq!(gazetteer.region_code("Texas").as_deref(), Some("TX"));
    }

    #[test]
    fn test_unknown_timezone_is_rejected() {
        let mut tz = HashMap::new();
        tz.insert("XX".to_string(), "Mars/Olympus_Mons".to_string());
        let err = Gazetteer::new(Vec::new(), tz, HashMap::new()).unwrap_err();
        assert!(matches!(err, GazetteerLoadError::InvalidTimezone { .. }));
    }
}

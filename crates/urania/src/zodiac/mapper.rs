//! Longitude to sign/degree/minute mapping.
//!
//! The mapping is pure, so results may be memoized. The cache is keyed by the
//! exact bits of the normalized longitude, so values either side of a sign or
//! degree boundary never share an entry.

use crate::zodiac::types::{Sign, ZodiacPosition};
use std::collections::HashMap;
use std::sync::RwLock;

/// Upper bound on memoized entries; once reached new results are computed but not stored.
const CACHE_CAPACITY: usize = 4096;

/// Reduce any longitude into [0, 360).
pub fn normalize_longitude(longitude: f64) -> f64 {
    if !longitude.is_finite() {
        return 0.0;
    }
    let reduced = longitude.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}

/// Maps ecliptic longitudes onto zodiac positions.
pub struct ZodiacMapper {
    cache: Option<RwLock<HashMap<u64, ZodiacPosition>>>,
}

impl ZodiacMapper {
    /// Create a mapper with memoization enabled
    pub fn new() -> Self {
        Self {
            cache: Some(RwLock::new(HashMap::new())),
        }
    }

    /// Create a mapper that always recomputes
    pub fn uncached() -> Self {
        Self { cache: None }
    }

    /// Map a longitude (any real number) onto sign, degree and minute.
    ///
    /// Minutes are rounded to the nearest arc minute and clamped to 59, so the sign
    /// and degree are always those of the unrounded longitude.
    pub fn map(&self, longitude: f64) -> ZodiacPosition {
        let normalized = normalize_longitude(longitude);
        let Some(cache) = &self.cache else {
            return compute(normalized);
        };

        let key = normalized.to_bits();
        if let Ok(entries) = cache.read() {
            if let Some(hit) = entries.get(&key) {
                return *hit;
            }
        }

        let position = compute(normalized);
        // A contended or poisoned lock only costs a recomputation next time.
        if let Ok(mut entries) = cache.try_write() {
            if entries.len() < CACHE_CAPACITY {
                entries.insert(key, position);
            }
        }
        position
    }

    /// Number of memoized longitudes
    pub fn cached_entries(&self) -> usize {
        self.cache
            .as_ref()
            .and_then(|c| c.read().ok().map(|entries| entries.len()))
            .unwrap_or(0)
    }
}

impl Default for ZodiacMapper {
    fn default() -> Self {
        Self::new()
    }
}

fn compute(normalized: f64) -> ZodiacPosition {
    let sign_index = (normalized / 30.0).floor() as usize % 12;
    let within_sign = normalized % 30.0;
    let degree = within_sign.floor().min(29.0) as u8;
    let minute = ((normalized % 1.0) * 60.0).round().min(59.0) as u8;

    ZodiacPosition {
        sign: Sign::from_index(sign_index),
        degree,
        minute,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_handles_negative_and_full_turns() {
        assert_eq!(normalize_longitude(360.0), 0.0);
        assert_eq!(normalize_longitude(-30.0), 330.0);
        assert_eq!(normalize_longitude(725.0), 5.0);
        assert_eq!(normalize_longitude(f64::NAN), 0.0);
        assert!(normalize_longitude(-1e-20) < 360.0);
    }

    #[test]
    fn test_cache_is_populated_once_per_longitude() {
        let mapper = ZodiacMapper::new();
        mapper.map(15.0);
        mapper.map(15.0);
        mapper.map(375.0);
        assert_eq!(mapper.cached_entries(), 1);
    }

    #[test]
    fn test_cache_keys_are_exact() {
        let mapper = ZodiacMapper::new();
        mapper.map(29.9999996);
        mapper.map(30.0000004);
        assert_eq!(mapper.cached_entries(), 2);
    }

    #[test]
    fn test_uncached_mapper_stores_nothing() {
        let mapper = ZodiacMapper::uncached();
        mapper.map(42.0);
        assert_eq!(mapper.cached_entries(), 0);
    }
}

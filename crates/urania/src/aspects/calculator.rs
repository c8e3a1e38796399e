use crate::aspects::types::{Aspect, AspectSettings, AspectType};
use crate::zodiac::normalize_longitude;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

/// Aspect detector
#[derive(Debug, Clone, Default)]
pub struct AspectDetector {
    settings: AspectSettings,
}

impl AspectDetector {
    /// Create a detector using the standard orbs
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: AspectSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AspectSettings {
        &self.settings
    }

    /// Find every aspect between the given labelled longitudes.
    ///
    /// Labels are sorted and de-duplicated (last longitude wins) before pairing,
    /// so the result does not depend on input order and each unordered pair is
    /// examined once. Every catalogue angle is tested for each pair.
    pub fn detect<K, I>(&self, bodies: I) -> Vec<Aspect<K>>
    where
        K: Ord + Clone + Display,
        I: IntoIterator<Item = (K, f64)>,
    {
        let points: BTreeMap<K, f64> = bodies
            .into_iter()
            .filter(|(label, _)| self.settings.includes(&label.to_string()))
            .map(|(label, lon)| (label, normalize_longitude(lon)))
            .collect();
        let points: Vec<(K, f64)> = points.into_iter().collect();

        let mut aspects = Vec::new();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let (label_a, lon_a) = &points[i];
                let (label_b, lon_b) = &points[j];
                let separation = angular_separation(*lon_a, *lon_b);

                for aspect_type in AspectType::ALL {
                    let deviation = deviation_from(separation, aspect_type.angle());
                    if deviation <= self.settings.orb_for(aspect_type) {
                        aspects.push(Aspect {
                            body_a: label_a.clone(),
                            body_b: label_b.clone(),
                            aspect_type,
                            orb: round_tenth(deviation),
                        });
                    }
                }
            }
        }

        aspects
    }

    /// Convenience form over a name -> longitude map
    pub fn detect_named(&self, longitudes: &HashMap<String, f64>) -> Vec<Aspect<String>> {
        self.detect(longitudes.iter().map(|(k, v)| (k.clone(), *v)))
    }
}

/// Angle between two longitudes folded into [0, 180]
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let diff = (lon1 - lon2).abs();
    diff.min(360.0 - diff)
}

/// Deviation of a separation from an aspect angle, measured around the circle
pub fn deviation_from(separation: f64, angle: f64) -> f64 {
    let raw = (separation - angle).abs();
    raw.min(360.0 - raw)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separation_wraps_through_zero() {
        assert!((angular_separation(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((angular_separation(0.0, 180.0) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_orb_is_rounded_to_one_decimal() {
        assert_eq!(round_tenth(2.34), 2.3);
        assert_eq!(round_tenth(2.35000001), 2.4);
    }

    #[test]
    fn test_overlapping_orbs_report_every_match() {
        let mut settings = AspectSettings::default();
        settings.orbs.insert(AspectType::Conjunction, 35.0);
        settings.orbs.insert(AspectType::Sextile, 35.0);
        let detector = AspectDetector::with_settings(settings);
        let aspects = detector.detect(vec![("a", 0.0), ("b", 30.0)]);
        let kinds: Vec<AspectType> = aspects.iter().map(|a| a.aspect_type).collect();
        assert!(kinds.contains(&AspectType::Conjunction));
        assert!(kinds.contains(&AspectType::Sextile));
    }
}

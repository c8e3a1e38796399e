use crate::ephemeris::Body;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Major aspect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AspectType {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

/// Broad character of an aspect, used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectNature {
    Neutral,
    Harmonious,
    Tense,
}

impl AspectType {
    pub const ALL: [AspectType; 5] = [
        AspectType::Conjunction,
        AspectType::Sextile,
        AspectType::Square,
        AspectType::Trine,
        AspectType::Opposition,
    ];

    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub fn angle(self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Sextile => 60.0,
            AspectType::Square => 90.0,
            AspectType::Trine => 120.0,
            AspectType::Opposition => 180.0,
        }
    }

    /// Default maximum orb
    pub fn default_orb(self) -> f64 {
        match self {
            AspectType::Sextile => 6.0,
            _ => 8.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectType::Conjunction => "Conjunction",
            AspectType::Sextile => "Sextile",
            AspectType::Square => "Square",
            AspectType::Trine => "Trine",
            AspectType::Opposition => "Opposition",
        }
    }

    pub fn nature(self) -> AspectNature {
        match self {
            AspectType::Conjunction => AspectNature::Neutral,
            AspectType::Sextile | AspectType::Trine => AspectNature::Harmonious,
            AspectType::Square | AspectType::Opposition => AspectNature::Tense,
        }
    }

    pub fn is_harmonious(self) -> bool {
        self.nature() == AspectNature::Harmonious
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AspectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AspectType::ALL
            .iter()
            .copied()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown aspect type: {}", s))
    }
}

/// An aspect between two labelled points.
///
/// `body_a` always sorts before `body_b`, so each unordered pair has one form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect<K = Body> {
    pub body_a: K,
    pub body_b: K,
    pub aspect_type: AspectType,
    /// Deviation from the exact angle in degrees, rounded to one decimal
    pub orb: f64,
}

/// Settings for aspect calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectSettings {
    /// Orb overrides per aspect type; missing entries use the default orb
    pub orbs: BTreeMap<AspectType, f64>,
    /// Labels to include; empty means every label passed in
    pub include_objects: HashSet<String>,
}

impl AspectSettings {
    pub fn orb_for(&self, aspect_type: AspectType) -> f64 {
        self.orbs
            .get(&aspect_type)
            .copied()
            .unwrap_or_else(|| aspect_type.default_orb())
    }

    pub fn includes(&self, label: &str) -> bool {
        self.include_objects.is_empty() || self.include_objects.contains(label)
    }
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self {
            orbs: AspectType::ALL
                .iter()
                .map(|a| (*a, a.default_orb()))
                .collect(),
            include_objects: HashSet::new(),
        }
    }
}

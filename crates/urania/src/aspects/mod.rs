pub mod calculator;
pub mod types;

pub use calculator::{angular_separation, AspectDetector};
pub use types::{Aspect, AspectNature, AspectSettings, AspectType};

use std::collections::HashMap;

/// Detect aspects between named longitudes using the standard orbs.
pub fn detect_aspects(longitudes: &HashMap<String, f64>) -> Vec<Aspect<String>> {
    AspectDetector::new().detect_named(longitudes)
}

use crate::chart::types::HouseCusp;
use crate::ephemeris::time::local_sidereal_hours;
use crate::zodiac::{normalize_longitude, position_of};

/// Ascendant longitude from Greenwich sidereal time and observer longitude:
/// the local sidereal angle turned half a circle.
pub fn ascendant_longitude(gmst_hours: f64, observer_longitude: f64) -> f64 {
    let lst = local_sidereal_hours(gmst_hours, observer_longitude);
    normalize_longitude(lst * 15.0 + 180.0)
}

/// Twelve equal houses, 30 degrees apart, the first starting at the Ascendant.
pub fn equal_houses(ascendant: f64) -> Vec<HouseCusp> {
    (0..12u8)
        .map(|i| {
            let longitude = normalize_longitude(ascendant + f64::from(i) * 30.0);
            HouseCusp {
                house: i + 1,
                position: position_of(longitude),
                longitude,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascendant_at_greenwich_midnight_sidereal() {
        assert!((ascendant_longitude(0.0, 0.0) - 180.0).abs() < 1e-9);
        // 12h sidereal plus 180 degrees wraps back to zero
        assert!(ascendant_longitude(12.0, 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_west_longitude_shifts_ascendant_back() {
        let east = ascendant_longitude(6.0, 0.0);
        let west = ascendant_longitude(6.0, -90.0);
        assert!((normalize_longitude(east - west) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_houses_wrap_past_pisces() {
        let houses = equal_houses(350.0);
        assert_eq!(houses[0].house, 1);
        assert!((houses[1].longitude - 20.0).abs() < 1e-9);
        assert_eq!(houses[11].house, 12);
    }
}

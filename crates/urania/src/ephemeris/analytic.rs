//! Built-in analytic ephemeris.
//!
//! Planets use the JPL mean Keplerian elements (Standish, valid 1800-2050 to a
//! few arc minutes for the inner planets); the Moon uses the leading periodic
//! terms of the ELP-2000/82 series as tabulated by Meeus (ch. 47), good to about
//! a tenth of a degree. Positions are geocentric; the observer location is
//! accepted for interface compatibility but no topocentric correction is applied.

use crate::ephemeris::provider::{Ephemeris, EphemerisError};
use crate::ephemeris::time::{julian_centuries, julian_day};
use crate::ephemeris::types::{Body, GeoCoordinate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// General precession in longitude, degrees per Julian century
const PRECESSION_PER_CENTURY: f64 = 1.396_971;

/// Mean orbital elements at J2000 and their rates per century:
/// a (AU), e, I, L, longitude of perihelion, longitude of ascending node (degrees).
#[derive(Debug, Clone, Copy)]
struct OrbitalElements {
    base: [f64; 6],
    rate: [f64; 6],
}

const MERCURY: OrbitalElements = OrbitalElements {
    base: [0.38709927, 0.20563593, 7.00497902, 252.25032350, 77.45779628, 48.33076593],
    rate: [0.00000037, 0.00001906, -0.00594749, 149472.67411175, 0.16047689, -0.12534081],
};

const VENUS: OrbitalElements = OrbitalElements {
    base: [0.72333566, 0.00677672, 3.39467605, 181.97909950, 131.60246718, 76.67984255],
    rate: [0.00000390, -0.00004107, -0.00078890, 58517.81538729, 0.00268329, -0.27769418],
};

const EARTH_MOON_BARYCENTER: OrbitalElements = OrbitalElements {
    base: [1.00000261, 0.01671123, -0.00001531, 100.46457166, 102.93768193, 0.0],
    rate: [0.00000562, -0.00004392, -0.01294668, 35999.37244981, 0.32327364, 0.0],
};

const MARS: OrbitalElements = OrbitalElements {
    base: [1.52371034, 0.09339410, 1.84969142, -4.55343205, -23.94362959, 49.55953891],
    rate: [0.00001847, 0.00007882, -0.00813131, 19140.30268499, 0.44441088, -0.29257343],
};

const JUPITER: OrbitalElements = OrbitalElements {
    base: [5.20288700, 0.04838624, 1.30439695, 34.39644051, 14.72847983, 100.47390909],
    rate: [-0.00011607, -0.00013253, -0.00183714, 3034.74612775, 0.21252668, 0.20469106],
};

const SATURN: OrbitalElements = OrbitalElements {
    base: [9.53667594, 0.05386179, 2.48599187, 49.95424423, 92.59887831, 113.66242448],
    rate: [-0.00125060, -0.00050991, 0.00193609, 1222.49362201, -0.41897216, -0.28867794],
};

const URANUS: OrbitalElements = OrbitalElements {
    base: [19.18916464, 0.04725744, 0.77263783, 313.23810451, 170.95427630, 74.01692503],
    rate: [-0.00196176, -0.00004397, -0.00242939, 428.48202785, 0.40805281, 0.04240589],
};

const NEPTUNE: OrbitalElements = OrbitalElements {
    base: [30.06992276, 0.00859048, 1.77004347, -55.12002969, 44.96476227, 131.78422574],
    rate: [0.00026291, 0.00005105, 0.00035372, 218.45945325, -0.32241464, -0.00508664],
};

const PLUTO: OrbitalElements = OrbitalElements {
    base: [39.48211675, 0.24882730, 17.14001206, 238.92903833, 224.06891629, 110.30393684],
    rate: [-0.00031596, 0.00005170, 0.00004818, 145.20780515, -0.04062942, -0.01183482],
};

/// Heliocentric ecliptic (J2000) rectangular coordinates in AU.
fn heliocentric(elements: &OrbitalElements, t: f64) -> [f64; 3] {
    let el: Vec<f64> = (0..6)
        .map(|i| elements.base[i] + elements.rate[i] * t)
        .collect();
    let (a, e) = (el[0], el[1]);
    let inclination = el[2].to_radians();
    let mean_longitude = el[3];
    let perihelion = el[4];
    let node = el[5];

    let arg_perihelion = (perihelion - node).to_radians();
    let node = node.to_radians();
    let mean_anomaly = (mean_longitude - perihelion).rem_euclid(360.0).to_radians();
    let ecc_anomaly = solve_kepler(mean_anomaly, e);

    let x_orb = a * (ecc_anomaly.cos() - e);
    let y_orb = a * (1.0 - e * e).sqrt() * ecc_anomaly.sin();

    let (sin_w, cos_w) = arg_perihelion.sin_cos();
    let (sin_n, cos_n) = node.sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();

    [
        (cos_w * cos_n - sin_w * sin_n * cos_i) * x_orb
            + (-sin_w * cos_n - cos_w * sin_n * cos_i) * y_orb,
        (cos_w * sin_n + sin_w * cos_n * cos_i) * x_orb
            + (-sin_w * sin_n + cos_w * cos_n * cos_i) * y_orb,
        (sin_w * sin_i) * x_orb + (cos_w * sin_i) * y_orb,
    ]
}

/// Solve Kepler's equation M = E - e sin E by Newton iteration.
fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let mut ecc = if e < 0.8 { mean_anomaly } else { std::f64::consts::PI };
    for _ in 0..30 {
        let delta = (ecc - e * ecc.sin() - mean_anomaly) / (1.0 - e * ecc.cos());
        ecc -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    ecc
}

/// Geocentric ecliptic longitude of the Moon, mean equinox of date (degrees).
fn moon_longitude(t: f64) -> f64 {
    let l = 218.3164477 + 481_267.881_234_21 * t;
    let d = (297.8501921 + 445_267.111_403_4 * t).to_radians();
    let m = (357.5291092 + 35_999.050_290_9 * t).to_radians();
    let mp = (134.9633964 + 477_198.867_505_5 * t).to_radians();
    let f = (93.2720950 + 483_202.017_523_3 * t).to_radians();

    let terms = 6.288774 * mp.sin()
        + 1.274027 * (2.0 * d - mp).sin()
        + 0.658314 * (2.0 * d).sin()
        + 0.213618 * (2.0 * mp).sin()
        - 0.185116 * m.sin()
        - 0.114332 * (2.0 * f).sin()
        + 0.058793 * (2.0 * d - 2.0 * mp).sin()
        + 0.057066 * (2.0 * d - m - mp).sin()
        + 0.053322 * (2.0 * d + mp).sin()
        + 0.045758 * (2.0 * d - m).sin()
        - 0.040923 * (m - mp).sin()
        - 0.034720 * d.sin()
        - 0.030383 * (m + mp).sin()
        + 0.015327 * (2.0 * d - 2.0 * f).sin()
        - 0.012528 * (mp + 2.0 * f).sin()
        + 0.010980 * (mp - 2.0 * f).sin();

    (l + terms).rem_euclid(360.0)
}

/// Ephemeris computed from closed-form orbital theory; needs no data files.
#[derive(Debug, Clone, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }

    /// Geocentric ecliptic longitude (equinox of date) at a Julian Date.
    pub fn longitude_at(&self, body: Body, jd: f64) -> Result<f64, EphemerisError> {
        let t = julian_centuries(jd);
        let precession = PRECESSION_PER_CENTURY * t;

        if body == Body::Moon {
            return Ok(moon_longitude(t));
        }

        let elements = match body {
            Body::Sun => None,
            Body::Mercury => Some(MERCURY),
            Body::Venus => Some(VENUS),
            Body::Mars => Some(MARS),
            Body::Jupiter => Some(JUPITER),
            Body::Saturn => Some(SATURN),
            Body::Uranus => Some(URANUS),
            Body::Neptune => Some(NEPTUNE),
            Body::Pluto => Some(PLUTO),
            Body::Moon | Body::Ascendant => {
                return Err(EphemerisError::UnsupportedBody { body });
            }
        };

        let earth = heliocentric(&EARTH_MOON_BARYCENTER, t);
        let geocentric = match elements {
            None => [-earth[0], -earth[1], -earth[2]],
            Some(el) => {
                let planet = heliocentric(&el, t);
                [planet[0] - earth[0], planet[1] - earth[1], planet[2] - earth[2]]
            }
        };

        let lon = geocentric[1].atan2(geocentric[0]).to_degrees() + precession;
        Ok(lon.rem_euclid(360.0))
    }
}

#[async_trait]
impl Ephemeris for AnalyticEphemeris {
    async fn longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        _observer: GeoCoordinate,
    ) -> Result<f64, EphemerisError> {
        self.longitude_at(body, julian_day(instant))
    }

    fn name(&self) -> &str {
        "analytic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::time::J2000_JD;

    fn angular_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    #[test]
    fn test_kepler_solution_satisfies_equation() {
        for &(m, e) in &[(0.3, 0.1), (2.0, 0.2056), (5.5, 0.25)] {
            let ecc = solve_kepler(m, e);
            assert!((ecc - e * ecc.sin() - m).abs() < 1e-10);
        }
    }

    #[test]
    fn test_sun_at_j2000() {
        // Apparent solar longitude at J2000.0 is about 280.37°
        let lon = AnalyticEphemeris.longitude_at(Body::Sun, J2000_JD).unwrap();
        assert!(angular_distance(lon, 280.37) < 0.1, "sun = {lon}");
    }

    #[test]
    fn test_moon_at_meeus_example() {
        // Meeus example 47.a: 1992-04-12 0h TD, λ = 133.162655°
        let lon = AnalyticEphemeris.longitude_at(Body::Moon, 2_448_724.5).unwrap();
        assert!(angular_distance(lon, 133.16) < 0.3, "moon = {lon}");
    }

    #[test]
    fn test_ascendant_is_not_an_ephemeris_body() {
        let err = AnalyticEphemeris
            .longitude_at(Body::Ascendant, J2000_JD)
            .unwrap_err();
        assert_eq!(err, EphemerisError::UnsupportedBody { body: Body::Ascendant });
    }
}

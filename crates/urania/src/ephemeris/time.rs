//! Julian dates and sidereal time.
//!
//! UTC is used in place of UT1; the difference (under a second) is far below the
//! precision of whole arc minutes.

use chrono::{DateTime, Utc};
use std::f64::consts::{PI, TAU};

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT)
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Convert a UTC instant to a Julian Date.
pub fn julian_day(instant: DateTime<Utc>) -> f64 {
    let seconds = instant.timestamp() as f64 + instant.timestamp_subsec_nanos() as f64 / 1e9;
    UNIX_EPOCH_JD + seconds / 86_400.0
}

/// Julian centuries since J2000.0
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / 36_525.0
}

/// Earth Rotation Angle in radians, [0, 2π).
///
/// IERS Conventions 2010, Eq. 5.15.
pub fn earth_rotation_angle_rad(jd: f64) -> f64 {
    let du = jd - J2000_JD;
    let theta = TAU * (0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du);
    theta.rem_euclid(TAU)
}

/// Greenwich Mean Sidereal Time in radians, [0, 2π).
///
/// ERA plus the Capitaine et al. (2003) polynomial.
pub fn gmst_rad(jd: f64) -> f64 {
    let era = earth_rotation_angle_rad(jd);
    let t = julian_centuries(jd);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let poly_arcsec = 0.014506 + 4612.156534 * t + 1.3915817 * t2
        - 0.00000044 * t3
        - 0.000029956 * t4
        - 0.0000000368 * t5;

    (era + poly_arcsec * ARCSEC_TO_RAD).rem_euclid(TAU)
}

/// Greenwich Mean Sidereal Time in hours, [0, 24).
pub fn gmst_hours(instant: DateTime<Utc>) -> f64 {
    gmst_rad(julian_day(instant)) * 12.0 / PI
}

/// Local sidereal time in hours for an east-positive longitude, [0, 24).
pub fn local_sidereal_hours(gmst_hours: f64, longitude_deg: f64) -> f64 {
    (gmst_hours + longitude_deg / 15.0).rem_euclid(24.0)
}

/// Mean longitude of the Sun (degrees, [0, 360)).
///
/// Low-precision; good to about a degree and a half.
pub fn mean_solar_longitude(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    (280.46646 + 36_000.76983 * t + 0.0003032 * t * t).rem_euclid(360.0)
}

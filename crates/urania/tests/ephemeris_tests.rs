use chrono::{TimeZone, Utc};
use urania::ephemeris::time::{gmst_hours, julian_day, local_sidereal_hours, J2000_JD};
use urania::ephemeris::{AnalyticEphemeris, Body, Ephemeris, EphemerisError, GeoCoordinate};

fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

fn observer() -> GeoCoordinate {
    GeoCoordinate::new(40.7128, -74.0060).unwrap()
}

#[test]
fn test_julian_day_of_j2000() {
    let noon = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    assert!((julian_day(noon) - J2000_JD).abs() < 1e-9);
}

#[test]
fn test_sidereal_time_range() {
    let instant = Utc.with_ymd_and_hms(1987, 4, 10, 19, 21, 0).unwrap();
    let gmst = gmst_hours(instant);
    // Meeus example 12.b: 8h34m57.09s
    assert!((gmst - 8.582525).abs() < 1e-3, "gmst = {gmst}");
    let lst = local_sidereal_hours(gmst, -120.0);
    assert!((0.0..24.0).contains(&lst));
}

#[tokio::test]
async fn test_analytic_sun_near_equinox() {
    let eph = AnalyticEphemeris::new();
    let instant = Utc.with_ymd_and_hms(2021, 3, 20, 9, 37, 0).unwrap();
    let sun = eph.longitude(Body::Sun, instant, observer()).await.unwrap();
    assert!(angular_distance(sun, 0.0) < 0.1, "sun = {sun}");
}

#[tokio::test]
async fn test_analytic_planets_are_plausible() {
    let eph = AnalyticEphemeris::new();
    let instant = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    // Reference geocentric longitudes at J2000.0, within a degree
    let reference = [
        (Body::Mars, 327.98),
        (Body::Jupiter, 25.25),
        (Body::Saturn, 40.40),
    ];
    for (body, expected) in reference {
        let lon = eph.longitude(body, instant, observer()).await.unwrap();
        assert!(angular_distance(lon, expected) < 1.0, "{body} = {lon}");
    }
}

#[tokio::test]
async fn test_analytic_covers_all_planets() {
    let eph = AnalyticEphemeris::new();
    let instant = Utc.with_ymd_and_hms(1969, 7, 20, 20, 17, 0).unwrap();
    for body in Body::PLANETS {
        let lon = eph.longitude(body, instant, observer()).await.unwrap();
        assert!((0.0..360.0).contains(&lon), "{body} = {lon}");
    }
}

#[tokio::test]
async fn test_analytic_rejects_ascendant() {
    let eph = AnalyticEphemeris::new();
    let err = eph
        .longitude(Body::Ascendant, Utc::now(), observer())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EphemerisError::UnsupportedBody {
            body: Body::Ascendant
        }
    );
}

#[test]
fn test_coordinate_validation() {
    assert!(GeoCoordinate::new(90.0, 180.0).is_some());
    assert!(GeoCoordinate::new(-90.5, 0.0).is_none());
    assert!(GeoCoordinate::new(0.0, 181.0).is_none());
    assert!(GeoCoordinate::new(f64::NAN, 0.0).is_none());
}

#[test]
fn test_body_parsing_and_glyphs() {
    assert_eq!("mars".parse::<Body>().unwrap(), Body::Mars);
    assert_eq!(Body::Sun.glyph(), "☉");
    assert_eq!(Body::Ascendant.fallback_offset(), None);
    assert_eq!(Body::Mars.fallback_offset(), Some(60.0));
}

#[cfg(feature = "swisseph")]
#[tokio::test]
#[ignore] // Requires Swiss Ephemeris files
async fn test_swiss_adapter_sun() {
    use urania::ephemeris::SwissEphemerisAdapter;

    let eph = SwissEphemerisAdapter::new(None).unwrap();
    let instant = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    let sun = eph.longitude(Body::Sun, instant, observer()).await.unwrap();
    assert!(angular_distance(sun, 280.37) < 0.05);
}

#[cfg(feature = "swisseph")]
#[test]
fn test_swiss_adapter_validates_path() {
    use urania::ephemeris::SwissEphemerisAdapter;

    let dir = tempfile::tempdir().unwrap();
    let adapter = SwissEphemerisAdapter::new(Some(dir.path().to_path_buf())).unwrap();
    assert_eq!(adapter.ephemeris_path(), &dir.path().to_path_buf());

    let missing = dir.path().join("absent");
    assert!(matches!(
        SwissEphemerisAdapter::new(Some(missing)),
        Err(EphemerisError::FileNotFound { .. })
    ));
}

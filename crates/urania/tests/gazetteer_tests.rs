use std::io::Write;
use urania::geocoding::{GazetteerLoadError, GeocodeError, Geocoder, DEFAULT_SEARCH_LIMIT};
use urania::Gazetteer;

fn builtin() -> Gazetteer {
    Gazetteer::builtin().unwrap()
}

#[test]
fn test_lookup_is_case_insensitive() {
    let g = builtin();
    let hit = g.lookup("new york", "ny").unwrap();
    assert_eq!(hit.display_name, "New York, NY");
    assert_eq!(hit.timezone, "America/New_York");
    assert!((hit.coordinate.latitude - 40.7128).abs() < 1e-9);
}

#[test]
fn test_same_name_different_regions() {
    let g = builtin();
    let il = g.lookup("Springfield", "IL").unwrap();
    let mo = g.lookup("Springfield", "MO").unwrap();
    assert_eq!(il.timezone, "America/Chicago");
    assert!((il.coordinate.longitude - mo.coordinate.longitude).abs() > 1.0);

    let me = g.lookup("Portland", "ME").unwrap();
    let or = g.lookup("Portland", "OR").unwrap();
    assert_eq!(me.timezone, "America/New_York");
    assert_eq!(or.timezone, "America/Los_Angeles");
}

#[test]
fn test_special_state_timezones() {
    let g = builtin();
    assert_eq!(g.timezone_for("AZ"), Some("America/Phoenix"));
    assert_eq!(g.timezone_for("IN"), Some("America/Indiana/Indianapolis"));
    assert_eq!(g.timezone_for("AK"), Some("America/Anchorage"));
    assert_eq!(g.timezone_for("DC"), Some("America/New_York"));
    assert_eq!(g.timezone_for("ZZ"), None);
}

#[test]
fn test_unknown_region_reported_before_city() {
    let g = builtin();
    assert_eq!(
        g.lookup("Austin", "ZZ").unwrap_err(),
        GeocodeError::UnknownRegion {
            region: "ZZ".to_string()
        }
    );
    assert!(matches!(
        g.lookup("Nowhere", "TX").unwrap_err(),
        GeocodeError::PlaceNotFound { .. }
    ));
}

#[test]
fn test_search_orders_by_population() {
    let g = builtin();
    let hits = g.find("springfield", DEFAULT_SEARCH_LIMIT);
    let regions: Vec<&str> = hits.iter().map(|c| c.region.as_str()).collect();
    assert_eq!(regions, vec!["MO", "MA", "IL"]);
}

#[test]
fn test_search_is_substring_and_limited() {
    let g = builtin();
    let hits = g.find("an", 5);
    assert_eq!(hits.len(), 5);
    assert!(hits.iter().all(|c| c.name.to_lowercase().contains("an")));
    for pair in hits.windows(2) {
        assert!(pair[0].population >= pair[1].population);
    }
}

#[test]
fn test_empty_search_returns_nothing() {
    assert!(builtin().find("   ", 10).is_empty());
}

#[tokio::test]
async fn test_geocoder_trait() {
    let g = builtin();
    let hit = g.resolve("Honolulu", "Hawaii").await.unwrap();
    assert_eq!(hit.timezone, "Pacific/Honolulu");
    let hits = g.search("kansas", 10).await;
    assert_eq!(hits[0].full_name(), "Kansas City, MO");
}

#[test]
fn test_load_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let cities = dir.path().join("cities.json");
    let regions = dir.path().join("regions.toml");

    let mut f = std::fs::File::create(&cities).unwrap();
    write!(
        f,
        r#"[{{"name":"Toronto","state_code":"on","lat":"43.6532","lng":"-79.3832","population":2731571}},
            {{"name":"Ottawa","state_code":"ON","lat":45.4215,"lng":-75.6972,"population":1017449}}]"#
    )
    .unwrap();
    std::fs::write(
        &regions,
        "[timezones]\nON = \"America/Toronto\"\n\n[names]\nOntario = \"ON\"\n",
    )
    .unwrap();

    let g = Gazetteer::from_files(&cities, Some(&regions)).unwrap();
    assert_eq!(g.len(), 2);
    let hit = g.lookup("toronto", "ontario").unwrap();
    assert_eq!(hit.timezone, "America/Toronto");
    assert_eq!(hit.display_name, "Toronto, ON");
}

#[test]
fn test_load_rejects_bad_timezone() {
    let dir = tempfile::tempdir().unwrap();
    let cities = dir.path().join("cities.json");
    let regions = dir.path().join("regions.toml");
    std::fs::write(&cities, "[]").unwrap();
    std::fs::write(&regions, "[timezones]\nXX = \"Not/AZone\"\n").unwrap();

    let err = Gazetteer::from_files(&cities, Some(&regions)).unwrap_err();
    assert!(matches!(err, GazetteerLoadError::InvalidTimezone { .. }));
}

#[test]
fn test_load_rejects_bad_coordinates() {
    let dir = tempfile::tempdir().unwrap();
    let cities = dir.path().join("cities.json");
    std::fs::write(
        &cities,
        r#"[{"name":"Nowhere","state_code":"TX","lat":"95.0","lng":"0"}]"#,
    )
    .unwrap();

    let err = Gazetteer::from_files(&cities, None).unwrap_err();
    assert!(matches!(err, GazetteerLoadError::InvalidCoordinate { .. }));
}

#[test]
fn test_load_missing_file() {
    let err = Gazetteer::from_files(std::path::Path::new("/definitely/not/here.json"), None)
        .unwrap_err();
    assert!(matches!(err, GazetteerLoadError::Io { .. }));
}

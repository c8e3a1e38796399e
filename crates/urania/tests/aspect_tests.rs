use std::collections::HashMap;
use urania::aspects::{detect_aspects, AspectDetector, AspectSettings, AspectType};
use urania::Body;

#[test]
fn test_trine_exact() {
    let detector = AspectDetector::new();
    let aspects = detector.detect(vec![(Body::Sun, 10.0), (Body::Moon, 130.0)]);

    assert_eq!(aspects.len(), 1);
    assert_eq!(aspects[0].aspect_type, AspectType::Trine);
    assert_eq!(aspects[0].orb, 0.0);
    assert_eq!(format!("{:.1}", aspects[0].orb), "0.0");
}

#[test]
fn test_conjunction_across_zero() {
    let detector = AspectDetector::new();
    let aspects = detector.detect(vec![("a", 357.0), ("b", 3.0)]);

    assert_eq!(aspects.len(), 1);
    assert_eq!(aspects[0].aspect_type, AspectType::Conjunction);
    assert_eq!(aspects[0].orb, 6.0);
}

#[test]
fn test_opposition_within_orb() {
    let detector = AspectDetector::new();
    let aspects = detector.detect(vec![("a", 100.0), ("b", 278.0)]);

    assert_eq!(aspects.len(), 1);
    assert_eq!(aspects[0].aspect_type, AspectType::Opposition);
    assert_eq!(aspects[0].orb, 2.0);
}

#[test]
fn test_sextile_orb_is_narrower() {
    let detector = AspectDetector::new();
    // 67° apart: 7° from sextile is outside its 6° orb
    assert!(detector.detect(vec![("a", 0.0), ("b", 67.0)]).is_empty());
    // 65.9° apart is inside
    let aspects = detector.detect(vec![("a", 0.0), ("b", 65.9)]);
    assert_eq!(aspects[0].aspect_type, AspectType::Sextile);
    assert_eq!(aspects[0].orb, 5.9);
}

#[test]
fn test_orb_boundary_is_inclusive() {
    let detector = AspectDetector::new();
    let aspects = detector.detect(vec![("a", 0.0), ("b", 98.0)]);
    assert_eq!(aspects.len(), 1);
    assert_eq!(aspects[0].aspect_type, AspectType::Square);
    assert_eq!(aspects[0].orb, 8.0);
}

#[test]
fn test_no_aspect_between_unrelated() {
    let detector = AspectDetector::new();
    assert!(detector.detect(vec![("a", 0.0), ("b", 40.0)]).is_empty());
}

#[test]
fn test_each_pair_reported_once() {
    let detector = AspectDetector::new();
    let bodies: Vec<(Body, f64)> = Body::PLANETS
        .iter()
        .enumerate()
        .map(|(i, b)| (*b, i as f64 * 30.0))
        .collect();
    let aspects = detector.detect(bodies);

    let mut seen = std::collections::HashSet::new();
    for a in &aspects {
        assert!(a.body_a < a.body_b);
        assert!(seen.insert((a.body_a, a.body_b, a.aspect_type)), "duplicate {:?}", a);
    }
}

#[test]
fn test_detection_ignores_input_order() {
    let detector = AspectDetector::new();
    let forward = vec![
        (Body::Sun, 12.0),
        (Body::Moon, 135.0),
        (Body::Mars, 190.0),
        (Body::Venus, 75.0),
    ];
    let mut reversed = forward.clone();
    reversed.reverse();

    assert_eq!(detector.detect(forward), detector.detect(reversed));
}

#[test]
fn test_duplicate_labels_collapse() {
    let detector = AspectDetector::new();
    let aspects = detector.detect(vec![("a", 0.0), ("a", 0.0), ("b", 90.0)]);
    assert_eq!(aspects.len(), 1);
}

#[test]
fn test_custom_orbs() {
    let mut settings = AspectSettings::default();
    settings.orbs.insert(AspectType::Trine, 2.0);
    let detector = AspectDetector::with_settings(settings);

    assert!(detector.detect(vec![("a", 0.0), ("b", 124.0)]).is_empty());
    assert_eq!(detector.detect(vec![("a", 0.0), ("b", 121.5)]).len(), 1);
}

#[test]
fn test_include_list_filters_labels() {
    let mut settings = AspectSettings::default();
    settings.include_objects.insert("Sun".to_string());
    settings.include_objects.insert("Moon".to_string());
    let detector = AspectDetector::with_settings(settings);

    let aspects = detector.detect(vec![
        (Body::Sun, 0.0),
        (Body::Moon, 180.0),
        (Body::Mars, 90.0),
    ]);
    assert_eq!(aspects.len(), 1);
    assert_eq!(aspects[0].body_a, Body::Sun);
    assert_eq!(aspects[0].body_b, Body::Moon);
}

#[test]
fn test_detect_from_name_map() {
    let mut longitudes = HashMap::new();
    longitudes.insert("Sun".to_string(), 10.0);
    longitudes.insert("Moon".to_string(), 130.0);
    longitudes.insert("Mars".to_string(), 10.5);

    let aspects = detect_aspects(&longitudes);
    assert_eq!(aspects.len(), 3);
    assert!(aspects
        .iter()
        .any(|a| a.body_a == "Mars" && a.body_b == "Sun" && a.aspect_type == AspectType::Conjunction));
}

#[test]
fn test_aspect_nature() {
    assert!(AspectType::Trine.is_harmonious());
    assert!(AspectType::Sextile.is_harmonious());
    assert!(!AspectType::Square.is_harmonious());
    assert!(!AspectType::Conjunction.is_harmonious());
    assert_eq!("opposition".parse::<AspectType>().unwrap(), AspectType::Opposition);
}

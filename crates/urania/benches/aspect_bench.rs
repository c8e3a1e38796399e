use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::aspects::{angular_separation, AspectDetector};
use urania::zodiac::ZodiacMapper;
use urania::Body;

fn bench_angular_separation(c: &mut Criterion) {
    c.bench_function("angular_separation", |b| {
        b.iter(|| angular_separation(black_box(350.0), black_box(10.0)))
    });
}

fn bench_detect_ten_planets(c: &mut Criterion) {
    let detector = AspectDetector::new();
    let bodies: Vec<(Body, f64)> = Body::PLANETS
        .iter()
        .enumerate()
        .map(|(i, body)| (*body, (i as f64) * 37.3))
        .collect();

    c.bench_function("detect_ten_planets", |b| {
        b.iter(|| detector.detect(black_box(bodies.clone())))
    });
}

fn bench_zodiac_mapping(c: &mut Criterion) {
    let cached = ZodiacMapper::new();
    let uncached = ZodiacMapper::uncached();

    c.bench_function("map_cached", |b| b.iter(|| cached.map(black_box(211.42))));
    c.bench_function("map_uncached", |b| b.iter(|| uncached.map(black_box(211.42))));
}

criterion_group!(
    benches,
    bench_angular_separation,
    bench_detect_ten_planets,
    bench_zodiac_mapping
);
criterion_main!(benches);

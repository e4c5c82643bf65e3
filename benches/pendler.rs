use criterion::{Criterion, criterion_group, criterion_main};
use pendler::{
    repository::{ConnectorStop, Repository},
    routing::TransportMode,
    score::commute_score,
    shared::geo::{Coordinate, Distance},
};
use std::hint::black_box;

/// A synthetic grid of stops around the Seattle area, dense enough that a
/// nearby query has real work to do.
fn fixture_repository() -> Repository {
    let mut stops = Vec::with_capacity(400);
    for i in 0..400 {
        let row = (i / 20) as f64;
        let col = (i % 20) as f64;
        stops.push(ConnectorStop {
            id: format!("stop-{i}").into(),
            name: format!("Stop {i}").into(),
            normalized_name: format!("stop {i}").into(),
            coordinate: Coordinate {
                latitude: 47.5 + row * 0.01,
                longitude: -122.4 + col * 0.01,
            },
            description: "Synthetic stop".into(),
            ..Default::default()
        });
    }
    Repository::new().with_stops(stops)
}

fn nearby_lookup(repository: &Repository) {
    let origin = Coordinate {
        latitude: 47.6,
        longitude: -122.3,
    };
    let _ = black_box(repository.nearby_stops(&origin, Distance::from_kilometers(2.0), 5));
}

fn score_sweep() {
    for minutes in 0..120 {
        let _ = black_box(commute_score(
            f64::from(minutes) * 60.0,
            f64::from(minutes) * 700.0,
            TransportMode::Bike,
        ));
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let repository = fixture_repository();

    let mut group = c.benchmark_group("Commute");

    group.bench_function("Nearby stop lookup", |b| {
        b.iter(|| nearby_lookup(&repository))
    });

    group.bench_function("Score sweep", |b| b.iter(score_sweep));

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

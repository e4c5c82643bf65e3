use pendler::{
    map::{MapPin, nearby_stop_pins},
    repository::{ConnectorStop, Repository, WALKABLE_DISTANCE},
    shared::geo::{Coordinate, Distance},
};

const ORIGIN: Coordinate = Coordinate {
    latitude: 47.6062,
    longitude: -122.3321,
};

fn stop(id: &str, latitude_offset: f64) -> ConnectorStop {
    ConnectorStop {
        id: id.into(),
        name: id.into(),
        normalized_name: id.to_lowercase().into(),
        coordinate: Coordinate {
            latitude: ORIGIN.latitude + latitude_offset,
            longitude: ORIGIN.longitude,
        },
        description: "Connector stop".into(),
        ..Default::default()
    }
}

/// Catalogue order is deliberately not distance order, so the sort is
/// actually exercised.
fn fixture_repository() -> Repository {
    Repository::new().with_stops(vec![
        stop("mid", 0.013),      // ~1.45 km north
        stop("close", 0.0045),   // ~0.50 km north
        stop("far", 0.0225),     // ~2.50 km north
        stop("distant", 0.09),   // ~10 km north
    ])
}

#[test]
fn results_stay_inside_the_radius() {
    let repository = fixture_repository();
    let radius = Distance::from_kilometers(2.0);
    let nearby = repository.nearby_stops(&ORIGIN, radius, 5);

    assert_eq!(nearby.len(), 2);
    for entry in &nearby {
        assert!(entry.distance <= radius);
    }
}

#[test]
fn results_are_sorted_ascending() {
    let repository = fixture_repository();
    let nearby = repository.nearby_stops(&ORIGIN, Distance::from_kilometers(20.0), 10);

    let ids: Vec<&str> = nearby.iter().map(|entry| entry.stop.id.as_ref()).collect();
    assert_eq!(ids, ["close", "mid", "far", "distant"]);
    for pair in nearby.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }
}

#[test]
fn results_are_truncated_to_max() {
    let repository = fixture_repository();
    let nearby = repository.nearby_stops(&ORIGIN, Distance::from_kilometers(20.0), 2);
    assert_eq!(nearby.len(), 2);
    assert_eq!(nearby[0].stop.id.as_ref(), "close");
}

#[test]
fn ties_keep_catalogue_order() {
    let repository = Repository::new().with_stops(vec![
        stop("twin-b", 0.0045),
        stop("twin-a", 0.0045),
    ]);
    let nearby = repository.nearby_stops(&ORIGIN, Distance::from_kilometers(2.0), 5);
    let ids: Vec<&str> = nearby.iter().map(|entry| entry.stop.id.as_ref()).collect();
    assert_eq!(ids, ["twin-b", "twin-a"]);
}

#[test]
fn distances_get_compact_labels() {
    let repository = fixture_repository();
    let nearby = repository.nearby_stops(&ORIGIN, Distance::from_kilometers(2.0), 5);
    assert_eq!(nearby[0].distance_formatted, "500m");
    assert_eq!(nearby[1].distance_formatted, "1.4km");
}

#[test]
fn no_matches_is_an_empty_list() {
    let repository = fixture_repository();
    let elsewhere = Coordinate {
        latitude: 40.7128,
        longitude: -74.0060,
    };
    let nearby = repository.nearby_stops(&elsewhere, Distance::from_kilometers(2.0), 5);
    assert!(nearby.is_empty());

    let summary = repository.nearby_summary(&elsewhere, Distance::from_kilometers(2.0));
    assert_eq!(summary.count, 0);
    assert!(summary.closest_distance.is_none());
    assert!(summary.closest_stop_name.is_none());
    assert!(!summary.has_walkable_stop);
}

#[test]
fn walkable_check_uses_the_fixed_threshold() {
    let repository = fixture_repository();
    assert!(repository.has_nearby_stop(&ORIGIN));

    // From here the closest stop is ~1.9 km away, outside walking range.
    let between = Coordinate {
        latitude: ORIGIN.latitude + 0.04,
        longitude: ORIGIN.longitude,
    };
    let closest = repository
        .nearby_stops(&between, Distance::from_kilometers(5.0), 1)
        .remove(0);
    assert!(closest.distance > WALKABLE_DISTANCE);
    assert!(!repository.has_nearby_stop(&between));
}

#[test]
fn summary_reports_the_closest_stop() {
    let repository = fixture_repository();
    let summary = repository.nearby_summary(&ORIGIN, Distance::from_kilometers(2.0));

    assert_eq!(summary.count, 2);
    assert_eq!(summary.closest_distance.as_deref(), Some("500m"));
    assert_eq!(summary.closest_stop_name.as_deref(), Some("close"));
    assert!(summary.has_walkable_stop);
}

#[test]
fn summary_walkable_flag_ignores_the_query_radius() {
    let repository = fixture_repository();
    // Wide radius finds stops, but none of them is walkable from here.
    let between = Coordinate {
        latitude: ORIGIN.latitude + 0.04,
        longitude: ORIGIN.longitude,
    };
    let summary = repository.nearby_summary(&between, Distance::from_kilometers(10.0));
    assert!(summary.count > 0);
    assert!(!summary.has_walkable_stop);
}

#[test]
fn summary_count_is_capped_at_the_default_result_limit() {
    let mut stops: Vec<ConnectorStop> = Vec::new();
    for i in 0..8 {
        stops.push(stop(&format!("stop-{i}"), 0.0045));
    }
    let repository = Repository::new().with_stops(stops);
    let summary = repository.nearby_summary(&ORIGIN, Distance::from_kilometers(2.0));
    assert_eq!(summary.count, 5);
}

#[test]
fn nearby_pins_carry_the_distance_phrase() {
    let repository = fixture_repository();
    let pins = nearby_stop_pins(&repository, &ORIGIN, Distance::from_kilometers(2.0), 5);

    assert_eq!(pins.len(), 2);
    let MapPin::ConnectorStop { description, .. } = &pins[0] else {
        panic!("expected a connector stop pin");
    };
    assert_eq!(
        description,
        "Connector stop\n\nDistance: 500m from your location"
    );
}

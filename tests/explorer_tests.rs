use pendler::{
    map::{ExplorerQuery, MapPin, RadiusKind, explorer_map},
    repository::{Building, ConnectorStop, Isochrone, Repository},
    routing::TransportMode,
    shared::geo::{Coordinate, Position},
};

fn stop(id: &str, commute_minutes: Option<u32>) -> ConnectorStop {
    ConnectorStop {
        id: id.into(),
        name: id.into(),
        normalized_name: id.to_lowercase().into(),
        coordinate: Coordinate {
            latitude: 47.6,
            longitude: -122.3,
        },
        description: "Connector stop".into(),
        commute_minutes,
        ..Default::default()
    }
}

fn fixture_repository() -> Repository {
    Repository::new()
        .with_stops(vec![
            stop("eastgate", Some(20)),
            stop("issaquah", Some(45)),
            stop("unrated", None),
        ])
        .with_buildings(vec![
            Building {
                id: "bear-creek-a".into(),
                name: "BEAR CREEK A".into(),
                normalized_name: "bear creek a".into(),
                building_name: "Bear Creek A".into(),
                coordinate: Coordinate {
                    latitude: 47.67,
                    longitude: -122.12,
                },
                ..Default::default()
            },
            Building {
                id: "bldg-109".into(),
                name: "BUILDING 109".into(),
                normalized_name: "building 109".into(),
                building_name: "Building 109".into(),
                coordinate: Coordinate {
                    latitude: 47.64,
                    longitude: -122.13,
                },
                ..Default::default()
            },
        ])
        .with_isochrones(vec![
            Isochrone {
                id: "iso-eastgate-15".into(),
                stop_id: "eastgate".into(),
                travel_minutes: 15,
                transport_mode: "walk".into(),
                address: "Eastgate Park & Ride".into(),
                center: Coordinate {
                    latitude: 47.6,
                    longitude: -122.3,
                },
                boundary: vec![
                    Position(-122.31, 47.59),
                    Position(-122.31, 47.61),
                    Position(-122.29, 47.61),
                    Position(-122.31, 47.59),
                ]
                .into(),
            },
            Isochrone {
                id: "iso-eastgate-30".into(),
                stop_id: "eastgate".into(),
                travel_minutes: 30,
                transport_mode: "walk".into(),
                address: "Eastgate Park & Ride".into(),
                center: Coordinate {
                    latitude: 47.6,
                    longitude: -122.3,
                },
                boundary: Box::default(),
            },
        ])
}

#[test]
fn no_method_shows_the_whole_catalogue() {
    let repository = fixture_repository();
    let map = explorer_map(&repository, &ExplorerQuery::default());

    assert_eq!(map.pins.len(), 5);
    assert!(map.routes.is_empty());
    assert!(map.radii.is_empty());
}

#[test]
fn drive_filters_buildings_by_name() {
    let repository = fixture_repository();
    let map = explorer_map(
        &repository,
        &ExplorerQuery {
            method: Some(TransportMode::Drive),
            building: Some("BUILDING 109".into()),
            ..Default::default()
        },
    );

    assert_eq!(map.pins.len(), 1);
    let MapPin::CampusBuilding { id, .. } = &map.pins[0] else {
        panic!("expected a building pin");
    };
    assert_eq!(id, "bldg-109");
    assert!(map.radii.is_empty());
}

#[test]
fn drive_without_a_building_selects_nothing() {
    let repository = fixture_repository();
    let map = explorer_map(
        &repository,
        &ExplorerQuery {
            method: Some(TransportMode::Drive),
            ..Default::default()
        },
    );
    assert!(map.pins.is_empty());
}

#[test]
fn connector_filters_stops_by_commute_budget() {
    let repository = fixture_repository();
    let map = explorer_map(
        &repository,
        &ExplorerQuery {
            method: Some(TransportMode::Transit),
            radius_minutes: Some(15),
            total_minutes: Some(40),
            ..Default::default()
        },
    );

    // 20 + 15 fits in 40. 45 + 15 does not, and an unrated stop never fits.
    assert_eq!(map.pins.len(), 1);
    assert_eq!(map.pins[0].id(), "eastgate");

    assert_eq!(map.radii.len(), 1);
    let radius = &map.radii[0];
    assert_eq!(radius.id, "eastgate-15");
    assert_eq!(radius.name, "eastgate - 15 min radius");
    assert_eq!(radius.kind, RadiusKind::ConnectorStopRadius);
    assert_eq!(radius.travel_time_minutes, 15);
    assert_eq!(radius.transport_mode, "walk");
    assert_eq!(radius.boundary.len(), 4);
}

#[test]
fn connector_without_a_budget_keeps_every_stop() {
    let repository = fixture_repository();
    let map = explorer_map(
        &repository,
        &ExplorerQuery {
            method: Some(TransportMode::Transit),
            ..Default::default()
        },
    );

    assert_eq!(map.pins.len(), 3);
    // No radius bucket selected, so no overlays either.
    assert!(map.radii.is_empty());
}

#[test]
fn connector_with_only_a_radius_overlays_without_filtering() {
    let repository = fixture_repository();
    let map = explorer_map(
        &repository,
        &ExplorerQuery {
            method: Some(TransportMode::Transit),
            radius_minutes: Some(30),
            ..Default::default()
        },
    );

    assert_eq!(map.pins.len(), 3);
    assert_eq!(map.radii.len(), 1);
    assert_eq!(map.radii[0].id, "eastgate-30");
}

#[test]
fn missing_minute_bucket_just_has_no_overlay() {
    let repository = fixture_repository();
    let map = explorer_map(
        &repository,
        &ExplorerQuery {
            method: Some(TransportMode::Transit),
            radius_minutes: Some(10),
            ..Default::default()
        },
    );
    assert_eq!(map.pins.len(), 3);
    assert!(map.radii.is_empty());
}

#[test]
fn other_methods_produce_an_empty_payload() {
    let repository = fixture_repository();
    let map = explorer_map(
        &repository,
        &ExplorerQuery {
            method: Some(TransportMode::Walk),
            ..Default::default()
        },
    );
    assert!(map.pins.is_empty());
    assert!(map.routes.is_empty());
    assert!(map.radii.is_empty());
}

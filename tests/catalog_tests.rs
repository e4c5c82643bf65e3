use std::{fs::File, io::Write, path::PathBuf};

use pendler::{catalog::Catalog, repository::Repository};
use zip::{ZipWriter, write::SimpleFileOptions};

const STOPS_CSV: &str = "\
stop_id,stop_name,stop_lat,stop_lon,description,has_parking,is_campus_building,commute_minutes,street,city,state,zip
eastgate,Eastgate Park & Ride,47.5788,-122.1703,Park and ride with connector service,1,0,25,14200 SE Eastgate Way,Bellevue,WA,98007
capitol-hill,Capitol Hill Station,47.6191,-122.3193,Light Rail Station,0,0,,,Seattle,WA,
bldg-stop,Building 92 Stop,47.6423,-122.1391,On campus stop,0,1,5,,,,
";

const BUILDINGS_CSV: &str = "\
building_id,name,building_name,lat,lon,street,city,state,zip
bldg-109,BUILDING 109,Building 109,47.6423,-122.1391,15010 NE 36th St,Redmond,WA,98052
bear-creek-a,BEAR CREEK A,Bear Creek A,47.6740,-122.1215,,,,
";

// The second call row arrives before the first by sequence, on purpose.
const SCHEDULES_CSV: &str = "\
trip_id,route_id,route_name,service_date,stop_id,stop_name,stop_sequence,arrival_time,departure_time,pick_up,drop_off
trip-1,rt-520,Overlake Express,2024-03-04,bldg-stop,Building 92 Stop,2,2024-03-04T08:05:00-08:00,2024-03-04T08:05:00-08:00,0,1
trip-1,rt-520,Overlake Express,2024-03-04,eastgate,Eastgate Park & Ride,1,2024-03-04T07:30:00-08:00,2024-03-04T07:32:00-08:00,1,0
trip-2,rt-520,Overlake Express,2024-03-04,eastgate,Eastgate Park & Ride,1,2024-03-04T08:30:00-08:00,2024-03-04T08:32:00-08:00,1,0
trip-2,rt-520,Overlake Express,2024-03-04,bldg-stop,Building 92 Stop,2,2024-03-04T09:05:00-08:00,2024-03-04T09:05:00-08:00,0,1
trip-3,rt-bad,Broken Route,2024-03-04,eastgate,Eastgate Park & Ride,1,not-a-time,also-not-a-time,1,0
";

const ISOCHRONES_CSV: &str = "\
isochrone_id,stop_id,travel_minutes,transport_mode,address,center_lat,center_lon
iso-eastgate-15,eastgate,15,walk,Eastgate Park & Ride,47.5788,-122.1703
";

// Vertices arrive out of sequence order.
const ISOCHRONE_POINTS_CSV: &str = "\
isochrone_id,point_lat,point_lon,point_sequence
iso-eastgate-15,47.59,-122.16,2
iso-eastgate-15,47.57,-122.18,1
iso-eastgate-15,47.57,-122.16,3
";

fn write_fixture_zip(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("pendler-{}-{}.zip", name, std::process::id()));
    let file = File::create(&path).unwrap();
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    writer.start_file("connector_stops.txt", options).unwrap();
    writer.write_all(STOPS_CSV.as_bytes()).unwrap();
    writer.start_file("buildings.txt", options).unwrap();
    writer.write_all(BUILDINGS_CSV.as_bytes()).unwrap();
    writer.start_file("schedules.txt", options).unwrap();
    writer.write_all(SCHEDULES_CSV.as_bytes()).unwrap();
    writer.start_file("isochrones.txt", options).unwrap();
    writer.write_all(ISOCHRONES_CSV.as_bytes()).unwrap();
    writer.start_file("isochrone_points.txt", options).unwrap();
    writer.write_all(ISOCHRONE_POINTS_CSV.as_bytes()).unwrap();
    writer.finish().unwrap();

    path
}

#[test]
fn catalog_zip_loads_into_a_repository() {
    let path = write_fixture_zip("full");
    let catalog = Catalog::new().from_zip(path.clone());
    let repository = Repository::new().load_catalog(&catalog).unwrap();

    assert_eq!(repository.stops.len(), 3);
    assert_eq!(repository.buildings.len(), 2);

    let eastgate = repository.stop_by_id("eastgate").unwrap();
    assert_eq!(eastgate.name.as_ref(), "Eastgate Park & Ride");
    assert!(eastgate.has_parking);
    assert!(!eastgate.is_campus_building);
    assert_eq!(eastgate.commute_minutes, Some(25));
    let address = eastgate.address.as_ref().unwrap();
    assert_eq!(address.city.as_deref(), Some("Bellevue"));

    // Empty CSV cells come through as None.
    let capitol_hill = repository.stop_by_id("capitol-hill").unwrap();
    assert_eq!(capitol_hill.commute_minutes, None);
    let address = capitol_hill.address.as_ref().unwrap();
    assert!(address.street.is_none());
    assert_eq!(address.city.as_deref(), Some("Seattle"));

    let campus_stop = repository.stop_by_id("bldg-stop").unwrap();
    assert!(campus_stop.is_campus_building);
    assert!(campus_stop.address.is_none());

    let building = repository.building_by_name("BUILDING 109").unwrap();
    assert_eq!(building.id.as_ref(), "bldg-109");
    assert_eq!(building.building_name.as_ref(), "Building 109");

    std::fs::remove_file(path).ok();
}

#[test]
fn schedule_rows_group_into_routes_and_trips() {
    let path = write_fixture_zip("schedules");
    let catalog = Catalog::new().from_zip(path.clone());
    let repository = Repository::new().load_catalog(&catalog).unwrap();

    let routes = repository.routes_for_stop("eastgate").unwrap();
    let route = routes
        .iter()
        .find(|route| route.id.as_ref() == "rt-520")
        .unwrap();
    assert_eq!(route.name.as_ref(), "Overlake Express");
    assert_eq!(route.trips.len(), 2);
    // Stop list follows call order, not file order.
    assert_eq!(route.stops[0].stop_id.as_ref(), "eastgate");
    assert_eq!(route.stops[1].stop_id.as_ref(), "bldg-stop");

    // Calls were shuffled in the file but come back in sequence order.
    let trip = route
        .trips
        .iter()
        .find(|trip| trip.id.as_ref() == "trip-1")
        .unwrap();
    assert_eq!(trip.calls[0].stop_id.as_ref(), "eastgate");
    assert_eq!(trip.calls[1].stop_id.as_ref(), "bldg-stop");
    assert!(trip.calls[0].pick_up);
    assert!(!trip.calls[0].drop_off);
    assert_eq!(trip.calls[0].departure_label(), "7:32 AM");

    // The route with unparseable timestamps was dropped entirely.
    assert!(
        !repository
            .shuttle_routes
            .iter()
            .any(|route| route.id.as_ref() == "rt-bad")
    );

    std::fs::remove_file(path).ok();
}

#[test]
fn isochrone_points_are_grouped_and_ordered() {
    let path = write_fixture_zip("isochrones");
    let catalog = Catalog::new().from_zip(path.clone());
    let repository = Repository::new().load_catalog(&catalog).unwrap();

    let isochrones = repository.isochrones_by_stop_id("eastgate").unwrap();
    assert_eq!(isochrones.len(), 1);
    let isochrone = isochrones[0];
    assert_eq!(isochrone.travel_minutes, 15);
    assert_eq!(isochrone.boundary.len(), 3);
    // Longitude first, sorted by the sequence column.
    assert_eq!(isochrone.boundary[0].0, -122.18);
    assert_eq!(isochrone.boundary[0].1, 47.57);
    assert_eq!(isochrone.boundary[1].1, 47.59);

    std::fs::remove_file(path).ok();
}

#[test]
fn missing_file_is_a_named_error() {
    let path = std::env::temp_dir().join(format!("pendler-empty-{}.zip", std::process::id()));
    let file = File::create(&path).unwrap();
    let mut writer = ZipWriter::new(file);
    writer
        .start_file("unrelated.txt", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"nothing").unwrap();
    writer.finish().unwrap();

    let catalog = Catalog::new().from_zip(path.clone());
    let result = Repository::new().load_catalog(&catalog);
    assert!(result.is_err());

    std::fs::remove_file(path).ok();
}

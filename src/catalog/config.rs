pub struct Config {
    pub stops_file_name: String,
    pub buildings_file_name: String,
    pub schedules_file_name: String,
    pub isochrones_file_name: String,
    pub isochrone_points_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stops_file_name: "connector_stops.txt".into(),
            buildings_file_name: "buildings.txt".into(),
            schedules_file_name: "schedules.txt".into(),
            isochrones_file_name: "isochrones.txt".into(),
            isochrone_points_file_name: "isochrone_points.txt".into(),
        }
    }
}

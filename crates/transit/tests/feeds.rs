use std::fs;

use translink_transit::prelude::*;

const ROUTES: &str = r#"[
    { "RouteNo": "004", "Name": "POWELL/DOWNTOWN/UBC", "Patterns": [
        { "PatternNo": "WB1", "Destination": "UBC", "Direction": "WEST" },
        { "PatternNo": "EB1", "Destination": "POWELL", "Direction": "EAST" }
    ] },
    { "RouteNo": "099", "Name": "COMMERCIAL-BROADWAY/UBC (B-LINE)", "Patterns": [
        { "PatternNo": "WB1", "Destination": "UBC", "Direction": "WEST" }
    ] }
]"#;

const STOPS: &str = r#"[
    { "StopNo": 50586, "Name": "WB W 4 AVE FS MACDONALD ST", "Latitude": 49.2000, "Longitude": -123.1000, "Routes": "004" },
    { "StopNo": 51479, "Name": "WB W BROADWAY FS CAMBIE ST", "Latitude": 49.3000, "Longitude": -123.2000, "Routes": "099, 004, 099" }
]"#;

const ROUTE_MAP: &str = "N004-WB1;49.19;-123.11;49.21;-123.09\nN099-WB1;49.29;-123.21;49.31;-123.19\n";

const ARRIVALS: &str = r#"[
    { "RouteNo": "004", "Schedules": [
        { "ExpectedCountdown": 12, "Destination": "UBC", "ScheduleStatus": "*" },
        { "ExpectedCountdown": 4, "Destination": "UBC", "ScheduleStatus": "-" },
        { "ExpectedCountdown": 30, "ScheduleStatus": "*" }
    ] }
]"#;

fn load() -> TransitNetwork {
    let dir = tempfile::tempdir().unwrap();
    let write = |name: &str, content: &str| {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        FileDataSource::new(path)
    };

    let routes = write("routes.json", ROUTES);
    let stops = write("stops.json", STOPS);
    let route_map = write("routemap.txt", ROUTE_MAP);

    let mut network = TransitNetwork::new();
    assert_eq!(
        parse_routes(&mut network, &routes).unwrap(),
        RouteFeedSummary { routes: 2, patterns: 3 }
    );
    assert_eq!(
        parse_stops(&mut network, &stops).unwrap(),
        StopFeedSummary { stops: 2, links: 3 }
    );
    assert_eq!(parse_route_map(&mut network, &route_map).unwrap(), 2);
    network
}

#[test]
fn loads_all_feeds() {
    let network = load();

    assert_eq!(network.routes().len(), 2);
    assert_eq!(network.stops().len(), 2);

    let route = network.routes().get("004").unwrap();
    assert_eq!(route.name(), "POWELL/DOWNTOWN/UBC");
    assert_eq!(route.stops(), &[StopNumber::new(50586), StopNumber::new(51479)]);
    assert_eq!(route.pattern("WB1").unwrap().path().len(), 2);
    assert!(route.pattern("EB1").unwrap().path().is_empty());

    let served: Vec<&str> = network
        .routes_serving(StopNumber::new(51479))
        .iter()
        .map(|r| r.number().as_str())
        .collect();
    assert_eq!(served, vec!["099", "004"]);
}

#[test]
fn links_are_consistent_in_both_directions() {
    let network = load();

    for route in network.routes().iter() {
        for stop in route.stops() {
            let stop = network.stops().get(*stop).unwrap();
            assert!(stop.is_served_by(route.number()));
        }
    }
    for stop in network.stops().iter() {
        for route in stop.routes() {
            assert!(network.route_has_stop(route.as_str(), stop.number()));
        }
    }
}

#[test]
fn arrivals_attach_to_stop() {
    let mut network = load();
    let stop = StopNumber::new(50586);

    assert_eq!(parse_arrivals(&mut network, stop, ARRIVALS).unwrap(), 2);

    let stop = network.stops().get(stop).unwrap();
    let upcoming = stop.upcoming_arrivals();
    assert_eq!(upcoming[0].countdown(), 4);
    assert!(upcoming[0].is_late());
    assert_eq!(upcoming[1].countdown(), 12);
}

#[test]
fn spatial_queries() {
    let mut network = load();

    let nearest = network.find_nearest_stop(LatLon::new(49.2001, -123.1001)).unwrap();
    assert_eq!(nearest.number(), StopNumber::new(50586));
    assert!(network.find_nearest_stop(LatLon::new(48.0, -120.0)).is_none());

    let north_west = LatLon::new(49.25, -123.15);
    let south_east = LatLon::new(49.15, -123.05);

    let stops = network.stops_in_rect(north_west, south_east);
    assert_eq!(stops.len(), 1);
    assert_eq!(stops[0].number(), StopNumber::new(50586));

    let patterns = network.patterns_in_rect(north_west, south_east);
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].route().as_str(), "004");

    network.stops_mut().set_selected(StopNumber::new(51479)).unwrap();
    assert_eq!(
        network.stops().selected().map(|s| s.name()),
        Some("WB W BROADWAY FS CAMBIE ST")
    );
    assert!(network.stops_mut().set_selected(StopNumber::new(1)).is_err());
}

#[test]
fn clear_resets_everything() {
    let mut network = load();
    network.stops_mut().set_selected(StopNumber::new(50586)).unwrap();

    network.clear();

    assert!(network.routes().is_empty());
    assert!(network.stops().is_empty());
    assert!(network.stops().selected().is_none());
}

#[test]
fn missing_file_is_io_error() {
    let mut network = TransitNetwork::new();
    let source = FileDataSource::new("/definitely/not/here/routes.json");

    assert!(matches!(
        parse_routes(&mut network, &source),
        Err(TransitError::Io(_))
    ));
}

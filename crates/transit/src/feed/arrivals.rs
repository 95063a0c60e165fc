//! Real-time arrival estimates for a single stop.

use tracing::{debug, info, warn};

use crate::feed::decode_records;
use crate::feed::records::ArrivalGroupRecord;
use crate::identifiers::*;
use crate::models::types::*;
use crate::registry::TransitNetwork;
use crate::source::DataSource;

/// Decode a JSON arrivals response for `stop` and apply it
pub fn parse_arrivals<S>(network: &mut TransitNetwork, stop: StopNumber, source: &S) -> Result<usize>
where
    S: DataSource + ?Sized,
{
    let groups: Vec<ArrivalGroupRecord> = decode_records(source)?;
    parse_arrival_records(network, stop, groups)
}

/// Append every complete schedule entry to the stop's arrivals.
///
/// Entries missing ExpectedCountdown, Destination or ScheduleStatus (and
/// groups missing RouteNo) are skipped. The parse fails with
/// [`TransitError::ArrivalsDataMissing`] only if the stop ends up holding no
/// arrivals at all; a stop that already has arrivals keeps them when a later
/// response is unusable. Routes named by arrivals are registered by number if
/// unknown.
///
/// Returns the number of arrivals added.
pub fn parse_arrival_records<I>(network: &mut TransitNetwork, stop: StopNumber, groups: I) -> Result<usize>
where
    I: IntoIterator<Item = ArrivalGroupRecord>,
{
    if !network.stops().contains(stop) {
        return Err(TransitError::StopNotFound(stop));
    }

    let mut arrivals = Vec::new();
    let mut skipped = 0;

    for group in groups {
        let schedules = group.schedules.unwrap_or_default();
        let Some(route_no) = group.route_no else {
            debug!(%stop, entries = schedules.len(), "skipping arrivals without RouteNo");
            skipped += schedules.len();
            continue;
        };
        let route = RouteNumber::new(route_no);

        for (index, schedule) in schedules.into_iter().enumerate() {
            match (schedule.expected_countdown, schedule.destination, schedule.schedule_status) {
                (Some(countdown), Some(destination), Some(status)) => {
                    arrivals.push(Arrival::new(countdown, destination, route.clone(), status));
                }
                _ => {
                    debug!(%stop, %route, index, "skipping incomplete schedule entry");
                    skipped += 1;
                }
            }
        }
    }

    for arrival in &arrivals {
        network.routes_mut().get_or_create(arrival.route().clone());
    }

    let count = arrivals.len();
    let target = network
        .stops_mut()
        .get_mut(stop)
        .ok_or(TransitError::StopNotFound(stop))?;
    for arrival in arrivals {
        target.add_arrival(arrival);
    }

    if target.arrivals().is_empty() {
        warn!(%stop, skipped, "no usable arrivals");
        return Err(TransitError::ArrivalsDataMissing(stop));
    }

    info!(%stop, arrivals = count, skipped, "parsed arrivals");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> (TransitNetwork, StopNumber) {
        let mut network = TransitNetwork::new();
        let stop = StopNumber::new(50586);
        network
            .stops_mut()
            .get_or_create_with(stop, "WB W 4 AVE", LatLon::new(49.268, -123.168));
        (network, stop)
    }

    #[test]
    fn test_parse_arrivals() {
        let (mut network, stop) = network();
        let count = parse_arrivals(
            &mut network,
            stop,
            r#"[
                { "RouteNo": "004", "RouteName": "POWELL/DOWNTOWN/UBC", "Schedules": [
                    { "ExpectedCountdown": 7, "Destination": "UBC", "ScheduleStatus": "*" },
                    { "ExpectedCountdown": 21, "Destination": "UBC", "ScheduleStatus": "-" }
                ] },
                { "RouteNo": "007", "Schedules": [
                    { "ExpectedCountdown": 3, "Destination": "DUNBAR", "ScheduleStatus": "+" }
                ] }
            ]"#,
        )
        .unwrap();
        assert_eq!(count, 3);

        let stop = network.stops().get(stop).unwrap();
        assert_eq!(stop.arrivals().len(), 3);
        assert_eq!(stop.arrivals()[0].route().as_str(), "004");
        assert_eq!(stop.arrivals()[0].destination(), "UBC");
        assert!(stop.arrivals()[1].is_late());
        assert_eq!(stop.upcoming_arrivals()[0].destination(), "DUNBAR");

        assert!(network.routes().contains("004"));
        assert!(network.routes().contains("007"));
    }

    #[test]
    fn test_incomplete_entries_are_skipped() {
        let (mut network, stop) = network();
        let count = parse_arrivals(
            &mut network,
            stop,
            r#"[{ "RouteNo": "004", "Schedules": [
                { "ExpectedCountdown": 7, "ScheduleStatus": "*" },
                { "ExpectedCountdown": 9, "Destination": "UBC", "ScheduleStatus": "*" },
                { "Destination": "UBC", "ScheduleStatus": "*" }
            ] }]"#,
        )
        .unwrap();

        assert_eq!(count, 1);
        assert_eq!(network.stops().get(stop).unwrap().arrivals()[0].countdown(), 9);
    }

    #[test]
    fn test_all_entries_missing_destination() {
        let (mut network, stop) = network();
        let result = parse_arrivals(
            &mut network,
            stop,
            r#"[{ "RouteNo": "004", "Schedules": [
                { "ExpectedCountdown": 7, "ScheduleStatus": "*" },
                { "ExpectedCountdown": 9, "ScheduleStatus": "*" }
            ] }]"#,
        );

        assert!(matches!(result, Err(TransitError::ArrivalsDataMissing(s)) if s == stop));
        assert!(network.stops().get(stop).unwrap().arrivals().is_empty());
        assert!(network.routes().is_empty());
    }

    #[test]
    fn test_unusable_batch_keeps_earlier_arrivals() {
        let (mut network, stop) = network();
        parse_arrivals(
            &mut network,
            stop,
            r#"[{ "RouteNo": "004", "Schedules": [
                { "ExpectedCountdown": 7, "Destination": "UBC", "ScheduleStatus": "*" }
            ] }]"#,
        )
        .unwrap();

        let count = parse_arrivals(
            &mut network,
            stop,
            r#"[{ "RouteNo": "004", "Schedules": [{ "ExpectedCountdown": 9, "ScheduleStatus": "*" }] }]"#,
        )
        .unwrap();

        assert_eq!(count, 0);
        let arrivals = network.stops().get(stop).unwrap().arrivals();
        assert_eq!(arrivals.len(), 1);
        assert_eq!(arrivals[0].countdown(), 7);
    }

    #[test]
    fn test_group_without_route_number() {
        let (mut network, stop) = network();
        let result = parse_arrivals(
            &mut network,
            stop,
            r#"[{ "Schedules": [{ "ExpectedCountdown": 7, "Destination": "UBC", "ScheduleStatus": "*" }] }]"#,
        );
        assert!(matches!(result, Err(TransitError::ArrivalsDataMissing(_))));

        let result = parse_arrivals(&mut network, stop, "[]");
        assert!(matches!(result, Err(TransitError::ArrivalsDataMissing(_))));
    }

    #[test]
    fn test_repeated_parses_accumulate() {
        let (mut network, stop) = network();
        let feed = r#"[{ "RouteNo": "004", "Schedules": [
            { "ExpectedCountdown": 7, "Destination": "UBC", "ScheduleStatus": "*" }
        ] }]"#;

        parse_arrivals(&mut network, stop, feed).unwrap();
        parse_arrivals(&mut network, stop, feed).unwrap();

        assert_eq!(network.stops().get(stop).unwrap().arrivals().len(), 2);
    }

    #[test]
    fn test_unknown_stop() {
        let mut network = TransitNetwork::new();
        let result = parse_arrivals(&mut network, StopNumber::new(1), "[]");
        assert!(matches!(result, Err(TransitError::StopNotFound(_))));
    }
}

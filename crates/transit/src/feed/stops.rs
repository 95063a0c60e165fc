//! Stop feed: stop locations and the routes serving them.

use tracing::{info, warn};

use crate::feed::decode_records;
use crate::feed::records::StopRecord;
use crate::identifiers::*;
use crate::models::types::*;
use crate::registry::TransitNetwork;
use crate::source::DataSource;

/// What a stop feed added
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StopFeedSummary {
    pub stops: usize,
    /// Route/stop links that did not exist before
    pub links: usize,
}

struct ValidStop {
    number: StopNumber,
    name: String,
    location: LatLon,
    routes: String,
}

/// Decode a JSON stop feed and apply it to the network
pub fn parse_stops<S>(network: &mut TransitNetwork, source: &S) -> Result<StopFeedSummary>
where
    S: DataSource + ?Sized,
{
    let records: Vec<StopRecord> = decode_records(source)?;
    parse_stop_records(network, records)
}

/// Register each stop and link it to every route it lists.
///
/// Routes are created by number if unknown. Route list entries are trimmed
/// and empty entries are ignored, so `"99, 99, 14"` links two routes. A
/// record missing Name, StopNo, Routes, Latitude or Longitude aborts the
/// parse with [`TransitError::StopDataMissing`]; earlier records stay applied.
pub fn parse_stop_records<I>(network: &mut TransitNetwork, records: I) -> Result<StopFeedSummary>
where
    I: IntoIterator<Item = StopRecord>,
{
    let mut summary = StopFeedSummary::default();

    for (index, record) in records.into_iter().enumerate() {
        let valid = validate_stop(record).map_err(|err| {
            warn!(record = index, %err, "rejecting stop feed");
            err
        })?;

        network
            .stops_mut()
            .get_or_create_with(valid.number, &valid.name, valid.location);

        for route in valid.routes.split(',').map(str::trim).filter(|r| !r.is_empty()) {
            network.routes_mut().get_or_create(route);
            if network.add_stop_to_route(route, valid.number)? {
                summary.links += 1;
            }
        }

        summary.stops += 1;
    }

    info!(stops = summary.stops, links = summary.links, "parsed stop feed");
    Ok(summary)
}

fn validate_stop(record: StopRecord) -> Result<ValidStop> {
    match (
        record.stop_no,
        record.name,
        record.latitude,
        record.longitude,
        record.routes,
    ) {
        (Some(number), Some(name), Some(latitude), Some(longitude), Some(routes)) => Ok(ValidStop {
            number: StopNumber::new(number),
            name,
            location: LatLon::new(latitude, longitude),
            routes,
        }),
        (number, ..) => Err(TransitError::StopDataMissing(match number {
            Some(number) => format!("stop {number} needs Name, Routes, Latitude and Longitude"),
            None => "stop record needs StopNo".into(),
        })),
    }
}

//! Route feed: route numbers, names and their patterns.

use tracing::{info, warn};

use crate::feed::decode_records;
use crate::feed::records::{PatternRecord, RouteRecord};
use crate::models::types::*;
use crate::registry::TransitNetwork;
use crate::source::DataSource;

/// What a route feed added or refreshed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteFeedSummary {
    pub routes: usize,
    pub patterns: usize,
}

struct ValidPattern {
    name: String,
    destination: String,
    direction: String,
}

struct ValidRoute {
    number: String,
    name: String,
    patterns: Vec<ValidPattern>,
}

/// Decode a JSON route feed and apply it to the network
pub fn parse_routes<S>(network: &mut TransitNetwork, source: &S) -> Result<RouteFeedSummary>
where
    S: DataSource + ?Sized,
{
    let records: Vec<RouteRecord> = decode_records(source)?;
    parse_route_records(network, records)
}

/// Register each route and refresh its patterns.
///
/// A record missing Name, RouteNo or Patterns, or holding a pattern missing
/// PatternNo, Destination or Direction, aborts the parse with
/// [`TransitError::RouteDataMissing`]. That record is checked in full before
/// anything from it is applied; earlier records stay applied.
pub fn parse_route_records<I>(network: &mut TransitNetwork, records: I) -> Result<RouteFeedSummary>
where
    I: IntoIterator<Item = RouteRecord>,
{
    let mut summary = RouteFeedSummary::default();

    for (index, record) in records.into_iter().enumerate() {
        let valid = validate_route(record).map_err(|err| {
            warn!(record = index, %err, "rejecting route feed");
            err
        })?;

        let route = network
            .routes_mut()
            .get_or_create_with(valid.number, &valid.name);
        for pattern in &valid.patterns {
            route.get_or_create_pattern_with(&pattern.name, &pattern.destination, &pattern.direction);
        }

        summary.routes += 1;
        summary.patterns += valid.patterns.len();
    }

    info!(routes = summary.routes, patterns = summary.patterns, "parsed route feed");
    Ok(summary)
}

fn validate_route(record: RouteRecord) -> Result<ValidRoute> {
    let (Some(number), Some(name), Some(patterns)) = (record.route_no, record.name, record.patterns)
    else {
        return Err(TransitError::RouteDataMissing(
            "route record needs Name, RouteNo and Patterns".into(),
        ));
    };

    let patterns = patterns
        .into_iter()
        .map(|pattern| validate_pattern(pattern, &number))
        .collect::<Result<Vec<_>>>()?;

    Ok(ValidRoute {
        number,
        name,
        patterns,
    })
}

fn validate_pattern(record: PatternRecord, route: &str) -> Result<ValidPattern> {
    match (record.pattern_no, record.destination, record.direction) {
        (Some(name), Some(destination), Some(direction)) => Ok(ValidPattern {
            name,
            destination,
            direction,
        }),
        _ => Err(TransitError::RouteDataMissing(format!(
            "pattern of route {route} needs PatternNo, Destination and Direction"
        ))),
    }
}

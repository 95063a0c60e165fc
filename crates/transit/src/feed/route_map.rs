//! Compact route-shape format.
//!
//! One pattern per line:
//!
//! ```text
//! N099-WB1;49.2627;-123.0691;49.2629;-123.0788
//! ```
//!
//! The first field is a one-character marker, the route number, `-`, and the
//! pattern name. The remaining fields alternate latitude and longitude. A
//! single trailing `;` is tolerated.

use tracing::{info, warn};

use crate::models::types::*;
use crate::registry::TransitNetwork;
use crate::source::DataSource;

/// One decoded line of a route map
#[derive(Clone, Debug, PartialEq)]
pub struct PatternShape {
    pub route: String,
    pub pattern: String,
    pub path: Vec<LatLon>,
}

/// Read a route map and store each path on its pattern
pub fn parse_route_map<S>(network: &mut TransitNetwork, source: &S) -> Result<usize>
where
    S: DataSource + ?Sized,
{
    let text = source.read_string()?;
    parse_route_map_str(network, &text)
}

/// Store every path in `text` on its route pattern, creating routes and
/// patterns as needed.
///
/// Blank lines are skipped. The whole document is decoded before anything is
/// stored, so a malformed line fails with [`TransitError::MalformedRouteMap`]
/// and leaves the network untouched. Returns the number of paths stored.
pub fn parse_route_map_str(network: &mut TransitNetwork, text: &str) -> Result<usize> {
    let shapes = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            parse_shape_line(line).map_err(|reason| {
                warn!(line = index + 1, %reason, "rejecting route map");
                TransitError::MalformedRouteMap {
                    line: index + 1,
                    reason,
                }
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let count = shapes.len();
    for shape in shapes {
        network
            .routes_mut()
            .get_or_create(shape.route)
            .get_or_create_pattern(&shape.pattern)
            .set_path(shape.path);
    }

    info!(patterns = count, "parsed route map");
    Ok(count)
}

/// Decode a single route map line
pub fn parse_shape_line(line: &str) -> std::result::Result<PatternShape, ShapeLineError> {
    let line = line.trim();
    let line = line.strip_suffix(';').unwrap_or(line);
    let mut fields = line.split(';');

    let header = fields.next().unwrap_or_default();
    let mut chars = header.chars();
    if chars.next().is_none() {
        return Err(ShapeLineError::MissingHeader);
    }
    let (route, pattern) = chars
        .as_str()
        .split_once('-')
        .ok_or_else(|| ShapeLineError::MissingSeparator(header.to_owned()))?;
    if route.is_empty() {
        return Err(ShapeLineError::MissingRouteNumber(header.to_owned()));
    }

    let coordinates: Vec<&str> = fields.collect();
    if coordinates.len() % 2 != 0 {
        return Err(ShapeLineError::OddCoordinateCount(coordinates.len()));
    }

    let path = coordinates
        .chunks(2)
        .map(|pair| -> std::result::Result<LatLon, ShapeLineError> {
            Ok(LatLon::new(parse_degrees(pair[0])?, parse_degrees(pair[1])?))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(PatternShape {
        route: route.to_owned(),
        pattern: pattern.to_owned(),
        path,
    })
}

fn parse_degrees(field: &str) -> std::result::Result<f64, ShapeLineError> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|degrees| degrees.is_finite())
        .ok_or_else(|| ShapeLineError::InvalidCoordinate(field.to_owned()))
}

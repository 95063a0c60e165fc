//! Core data types and errors for the transit model.

use std::cmp::Ordering;
use std::fmt;

use geo::Point;

use crate::identifiers::*;

// ============================================================================
// Coordinates
// ============================================================================

/// A latitude/longitude pair in degrees.
///
/// The constructor does not validate the range; feed data is taken as given.
/// Use [`LatLon::is_valid`] where it matters.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LatLon {
    latitude: f64,
    longitude: f64,
}

impl LatLon {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

// geo uses x = longitude, y = latitude
impl From<LatLon> for Point {
    fn from(value: LatLon) -> Self {
        Point::new(value.longitude, value.latitude)
    }
}

impl From<Point> for LatLon {
    fn from(value: Point) -> Self {
        Self::new(value.y(), value.x())
    }
}

// ============================================================================
// Arrivals
// ============================================================================

/// A real-time arrival estimate for a bus at a stop.
///
/// Arrivals are immutable once created and order by countdown, so the
/// soonest bus sorts first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arrival {
    countdown: i32,
    destination: String,
    route: RouteNumber,
    status: String,
}

impl Arrival {
    pub fn new(
        countdown: i32,
        destination: impl Into<String>,
        route: RouteNumber,
        status: impl Into<String>,
    ) -> Self {
        Self {
            countdown,
            destination: destination.into(),
            route,
            status: status.into(),
        }
    }

    /// Minutes until the bus is expected
    pub fn countdown(&self) -> i32 {
        self.countdown
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn route(&self) -> &RouteNumber {
        &self.route
    }

    /// Raw schedule status ("*" on time, "-" late, "+" early)
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_late(&self) -> bool {
        self.status.trim() == "-"
    }

    pub fn is_early(&self) -> bool {
        self.status.trim() == "+"
    }
}

impl Ord for Arrival {
    fn cmp(&self, other: &Self) -> Ordering {
        self.countdown
            .cmp(&other.countdown)
            .then_with(|| self.route.cmp(&other.route))
            .then_with(|| self.destination.cmp(&other.destination))
            .then_with(|| self.status.cmp(&other.status))
    }
}

impl PartialOrd for Arrival {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Why a single route map line could not be decoded
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ShapeLineError {
    #[error("missing route header")]
    MissingHeader,

    #[error("route header '{0}' has no '-'")]
    MissingSeparator(String),

    #[error("route header '{0}' has no route number")]
    MissingRouteNumber(String),

    #[error("odd number of coordinate fields ({0})")]
    OddCoordinateCount(usize),

    #[error("'{0}' is not a finite coordinate")]
    InvalidCoordinate(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Route data missing: {0}")]
    RouteDataMissing(String),

    #[error("Stop data missing: {0}")]
    StopDataMissing(String),

    #[error("No usable arrivals for stop {0}")]
    ArrivalsDataMissing(StopNumber),

    #[error("Stop {0} is not registered")]
    NotRegistered(StopNumber),

    #[error("Stop not found: {0}")]
    StopNotFound(StopNumber),

    #[error("Route not found: {0}")]
    RouteNotFound(RouteNumber),

    #[error("Malformed route map at line {line}: {reason}")]
    MalformedRouteMap { line: usize, reason: ShapeLineError },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latlon_point_conversion() {
        let vancouver = LatLon::new(49.2827, -123.1207);
        let point: Point = vancouver.into();

        assert_eq!(point.x(), -123.1207);
        assert_eq!(point.y(), 49.2827);
        assert_eq!(LatLon::from(point), vancouver);
    }

    #[test]
    fn test_latlon_validity() {
        assert!(LatLon::new(49.2, -123.1).is_valid());
        assert!(!LatLon::new(91.0, 0.0).is_valid());
        assert!(!LatLon::new(0.0, -180.5).is_valid());
        assert!(!LatLon::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_arrival_ordering() {
        let later = Arrival::new(12, "UBC", RouteNumber::new("099"), "*");
        let sooner = Arrival::new(3, "Commercial-Broadway", RouteNumber::new("099"), "-");

        let mut arrivals = vec![later.clone(), sooner.clone()];
        arrivals.sort();

        assert_eq!(arrivals, vec![sooner.clone(), later]);
        assert!(sooner.is_late());
        assert!(!sooner.is_early());
    }

    #[test]
    fn test_error_messages() {
        let err = TransitError::NotRegistered(StopNumber::new(50586));
        assert_eq!(err.to_string(), "Stop 50586 is not registered");

        let err = TransitError::MalformedRouteMap {
            line: 3,
            reason: ShapeLineError::OddCoordinateCount(5),
        };
        assert_eq!(
            err.to_string(),
            "Malformed route map at line 3: odd number of coordinate fields (5)"
        );
    }
}

//! Bus routes and their patterns.

use std::hash::{Hash, Hasher};

use crate::identifiers::*;
use crate::models::types::*;
use crate::spatial::geometry::{rectangle_contains_point, rectangle_intersects_line};

// ============================================================================
// Route Pattern
// ============================================================================

/// A directional variant of a route with its own destination and path.
///
/// Pattern names are only unique within their owning route, so identity is
/// the (route, name) pair.
#[derive(Clone, Debug)]
pub struct RoutePattern {
    name: PatternName,
    route: RouteNumber,
    destination: String,
    direction: String,
    path: Vec<LatLon>,
}

impl RoutePattern {
    pub fn new(
        name: PatternName,
        route: RouteNumber,
        destination: impl Into<String>,
        direction: impl Into<String>,
    ) -> Self {
        Self {
            name,
            route,
            destination: destination.into(),
            direction: direction.into(),
            path: Vec::new(),
        }
    }

    pub fn name(&self) -> &PatternName {
        &self.name
    }

    /// Number of the route this pattern belongs to
    pub fn route(&self) -> &RouteNumber {
        &self.route
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn direction(&self) -> &str {
        &self.direction
    }

    pub fn path(&self) -> &[LatLon] {
        &self.path
    }

    pub fn set_destination(&mut self, destination: impl Into<String>) {
        self.destination = destination.into();
    }

    pub fn set_direction(&mut self, direction: impl Into<String>) {
        self.direction = direction.into();
    }

    /// Replace the whole path
    pub fn set_path(&mut self, path: Vec<LatLon>) {
        self.path = path;
    }

    /// Consecutive point pairs along the path
    pub fn segments(&self) -> impl Iterator<Item = (LatLon, LatLon)> + '_ {
        self.path.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Whether any part of the path falls inside the given map bounds.
    ///
    /// A single-point path is tested by containment; an empty path never
    /// intersects.
    pub fn intersects_rect(&self, north_west: LatLon, south_east: LatLon) -> bool {
        match self.path.as_slice() {
            [] => false,
            [only] => rectangle_contains_point(north_west, south_east, *only),
            _ => self
                .segments()
                .any(|(src, dst)| rectangle_intersects_line(north_west, south_east, src, dst)),
        }
    }
}

impl PartialEq for RoutePattern {
    fn eq(&self, other: &Self) -> bool {
        self.route == other.route && self.name == other.name
    }
}

impl Eq for RoutePattern {}

impl Hash for RoutePattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.route.hash(state);
        self.name.hash(state);
    }
}

// ============================================================================
// Route
// ============================================================================

/// A bus route, identified solely by its route number.
///
/// Stops are kept in the order they were added, without duplicates. The
/// stop list is only changed through
/// [`TransitNetwork`](crate::registry::TransitNetwork) so that each stop's
/// route set stays consistent with it.
#[derive(Clone, Debug)]
pub struct Route {
    number: RouteNumber,
    name: String,
    stops: Vec<StopNumber>,
    patterns: Vec<RoutePattern>,
}

impl Route {
    pub fn new(number: RouteNumber, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            stops: Vec::new(),
            patterns: Vec::new(),
        }
    }

    pub fn number(&self) -> &RouteNumber {
        &self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Stops on this route in the order they were added
    pub fn stops(&self) -> &[StopNumber] {
        &self.stops
    }

    pub fn has_stop(&self, stop: StopNumber) -> bool {
        self.stops.contains(&stop)
    }

    /// Patterns in the order they were first added
    pub fn patterns(&self) -> &[RoutePattern] {
        &self.patterns
    }

    pub fn pattern(&self, name: &str) -> Option<&RoutePattern> {
        self.patterns.iter().find(|p| p.name.as_str() == name)
    }

    pub fn pattern_mut(&mut self, name: &str) -> Option<&mut RoutePattern> {
        self.patterns.iter_mut().find(|p| p.name.as_str() == name)
    }

    /// Add a pattern unless one with the same name is already present.
    ///
    /// Returns `Ok(false)` if the route already had the pattern, and an error
    /// if the pattern belongs to a different route.
    pub fn add_pattern(&mut self, pattern: RoutePattern) -> Result<bool> {
        if pattern.route != self.number {
            return Err(TransitError::InvalidData(format!(
                "pattern {} belongs to route {}, not {}",
                pattern.name, pattern.route, self.number
            )));
        }
        if self.patterns.contains(&pattern) {
            return Ok(false);
        }
        self.patterns.push(pattern);
        Ok(true)
    }

    /// Look up a pattern by name, creating it with a blank destination and
    /// direction if absent.
    pub fn get_or_create_pattern(&mut self, name: &str) -> &mut RoutePattern {
        let index = self.pattern_index_or_insert(name, "", "");
        &mut self.patterns[index]
    }

    /// Look up a pattern by name, creating it if absent. The destination and
    /// direction are written on every call, including for an existing pattern.
    pub fn get_or_create_pattern_with(
        &mut self,
        name: &str,
        destination: &str,
        direction: &str,
    ) -> &mut RoutePattern {
        let index = self.pattern_index_or_insert(name, destination, direction);
        let pattern = &mut self.patterns[index];
        pattern.set_destination(destination);
        pattern.set_direction(direction);
        pattern
    }

    fn pattern_index_or_insert(&mut self, name: &str, destination: &str, direction: &str) -> usize {
        if let Some(index) = self.patterns.iter().position(|p| p.name.as_str() == name) {
            return index;
        }
        self.patterns.push(RoutePattern::new(
            PatternName::new(name),
            self.number.clone(),
            destination,
            direction,
        ));
        self.patterns.len() - 1
    }

    pub(crate) fn insert_stop(&mut self, stop: StopNumber) -> bool {
        if self.stops.contains(&stop) {
            return false;
        }
        self.stops.push(stop);
        true
    }

    pub(crate) fn remove_stop(&mut self, stop: StopNumber) -> bool {
        let before = self.stops.len();
        self.stops.retain(|s| *s != stop);
        self.stops.len() != before
    }

    pub(crate) fn clear_stops(&mut self) {
        self.stops.clear();
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Route {}

impl Hash for Route {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_pattern_defaults() {
        let mut route = Route::new(RouteNumber::new("014"), "HASTINGS/UBC");

        let pattern = route.get_or_create_pattern("EB1");
        assert_eq!(pattern.name().as_str(), "EB1");
        assert_eq!(pattern.route().as_str(), "014");
        assert_eq!(pattern.destination(), "");
        assert_eq!(pattern.direction(), "");

        route.get_or_create_pattern("EB1");
        assert_eq!(route.patterns().len(), 1);
    }

    #[test]
    fn test_get_or_create_pattern_refreshes_values() {
        let mut route = Route::new(RouteNumber::new("014"), "HASTINGS/UBC");
        route.get_or_create_pattern_with("WB1", "UBC", "WEST");

        let pattern = route.get_or_create_pattern_with("WB1", "BLANCA", "WEST");
        assert_eq!(pattern.destination(), "BLANCA");

        // Plain lookup leaves the values alone
        let pattern = route.get_or_create_pattern("WB1");
        assert_eq!(pattern.destination(), "BLANCA");
        assert_eq!(pattern.direction(), "WEST");
        assert_eq!(route.patterns().len(), 1);
    }

    #[test]
    fn test_add_pattern() {
        let mut route = Route::new(RouteNumber::new("099"), "COMMERCIAL-BROADWAY/UBC (B-LINE)");
        let pattern = RoutePattern::new(PatternName::new("WB1"), RouteNumber::new("099"), "UBC", "WEST");

        assert!(route.add_pattern(pattern.clone()).unwrap());
        assert!(!route.add_pattern(pattern).unwrap());

        let foreign = RoutePattern::new(PatternName::new("WB1"), RouteNumber::new("014"), "UBC", "WEST");
        assert!(matches!(route.add_pattern(foreign), Err(TransitError::InvalidData(_))));
        assert_eq!(route.patterns().len(), 1);
    }

    #[test]
    fn test_pattern_identity_is_scoped_to_route() {
        let a = RoutePattern::new(PatternName::new("EB1"), RouteNumber::new("004"), "", "");
        let b = RoutePattern::new(PatternName::new("EB1"), RouteNumber::new("014"), "", "");
        assert_ne!(a, b);
    }

    #[test]
    fn test_route_stop_list() {
        let mut route = Route::new(RouteNumber::new("004"), "");
        assert!(route.insert_stop(StopNumber::new(2)));
        assert!(route.insert_stop(StopNumber::new(1)));
        assert!(!route.insert_stop(StopNumber::new(2)));

        assert_eq!(route.stops(), &[StopNumber::new(2), StopNumber::new(1)]);
        assert!(route.remove_stop(StopNumber::new(2)));
        assert!(!route.has_stop(StopNumber::new(2)));
    }

    #[test]
    fn test_pattern_intersects_rect() {
        let mut pattern = RoutePattern::new(PatternName::new("A"), RouteNumber::new("12"), "", "");
        let nw = LatLon::new(49.3, -123.2);
        let se = LatLon::new(49.2, -123.1);
        assert!(!pattern.intersects_rect(nw, se));

        pattern.set_path(vec![LatLon::new(49.25, -123.15)]);
        assert!(pattern.intersects_rect(nw, se));

        // Crosses the box without a vertex inside it
        pattern.set_path(vec![LatLon::new(49.25, -123.3), LatLon::new(49.25, -123.0)]);
        assert!(pattern.intersects_rect(nw, se));

        pattern.set_path(vec![LatLon::new(49.5, -123.3), LatLon::new(49.5, -123.0)]);
        assert!(!pattern.intersects_rect(nw, se));
    }
}

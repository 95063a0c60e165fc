//! Bus stops and the arrivals recorded at them.

use std::hash::{Hash, Hasher};

use crate::identifiers::*;
use crate::models::types::*;

/// A bus stop, identified by its stop number.
///
/// The set of routes serving the stop is stored as route numbers in the
/// order they were first linked. It is only changed through
/// [`TransitNetwork`](crate::registry::TransitNetwork), which keeps it in
/// step with each route's stop list.
#[derive(Clone, Debug)]
pub struct Stop {
    number: StopNumber,
    name: String,
    location: LatLon,
    routes: Vec<RouteNumber>,
    arrivals: Vec<Arrival>,
}

impl Stop {
    pub fn new(number: StopNumber, name: impl Into<String>, location: LatLon) -> Self {
        Self {
            number,
            name: name.into(),
            location,
            routes: Vec::new(),
            arrivals: Vec::new(),
        }
    }

    pub fn number(&self) -> StopNumber {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> LatLon {
        self.location
    }

    /// Routes serving this stop, in the order they were linked
    pub fn routes(&self) -> &[RouteNumber] {
        &self.routes
    }

    pub fn is_served_by(&self, route: &RouteNumber) -> bool {
        self.routes.contains(route)
    }

    /// Known arrivals in the order they were recorded
    pub fn arrivals(&self) -> &[Arrival] {
        &self.arrivals
    }

    /// Arrivals sorted soonest first
    pub fn upcoming_arrivals(&self) -> Vec<&Arrival> {
        let mut arrivals: Vec<&Arrival> = self.arrivals.iter().collect();
        arrivals.sort();
        arrivals
    }

    /// Record an arrival. Arrivals accumulate until [`Stop::clear_arrivals`].
    pub fn add_arrival(&mut self, arrival: Arrival) {
        self.arrivals.push(arrival);
    }

    pub fn clear_arrivals(&mut self) {
        self.arrivals.clear();
    }

    /// Returns false if the route was already present.
    pub(crate) fn insert_route(&mut self, route: RouteNumber) -> bool {
        if self.routes.contains(&route) {
            return false;
        }
        self.routes.push(route);
        true
    }

    pub(crate) fn remove_route(&mut self, route: &RouteNumber) -> bool {
        let before = self.routes.len();
        self.routes.retain(|r| r != route);
        self.routes.len() != before
    }

    pub(crate) fn clear_routes(&mut self) {
        self.routes.clear();
    }
}

impl PartialEq for Stop {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Stop {}

impl Hash for Stop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
    }
}

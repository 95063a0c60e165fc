//! The in-memory transit network: stops, routes and the links between them.
//!
//! Stops and routes reference each other by number rather than by pointer.
//! Each route lists its stop numbers and each stop lists its route numbers;
//! every method here that changes one side changes the other in the same
//! call, so callers never see a half-linked pair.
//!
//! The network is plain owned state. It lives as long as its owner, is only
//! emptied by the `clear*` methods, and needs `&mut` for every change, so
//! there is at most one writer at a time. Wrap it in a lock to share it
//! between threads.

use crate::config::NetworkConfig;
use crate::identifiers::*;
use crate::models::{route::*, stop::Stop, types::*};
use crate::registry::{routes::RouteRegistry, stops::StopRegistry};

#[derive(Debug, Default)]
pub struct TransitNetwork {
    stops: StopRegistry,
    routes: RouteRegistry,
    config: NetworkConfig,
}

impl TransitNetwork {
    /// Create an empty network with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NetworkConfig) -> Self {
        Self {
            stops: StopRegistry::with_config(&config),
            routes: RouteRegistry::new(),
            config,
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn stops(&self) -> &StopRegistry {
        &self.stops
    }

    pub fn stops_mut(&mut self) -> &mut StopRegistry {
        &mut self.stops
    }

    pub fn routes(&self) -> &RouteRegistry {
        &self.routes
    }

    pub fn routes_mut(&mut self) -> &mut RouteRegistry {
        &mut self.routes
    }

    // ---- Links ----

    /// Link a stop and a route in both directions.
    ///
    /// Returns `Ok(false)` if they were already linked. Both must already be
    /// registered; otherwise nothing changes.
    pub fn add_stop_to_route(&mut self, route: &str, stop: StopNumber) -> Result<bool> {
        if !self.stops.contains(stop) {
            return Err(TransitError::StopNotFound(stop));
        }
        let route = self
            .routes
            .get_mut(route)
            .ok_or_else(|| TransitError::RouteNotFound(RouteNumber::new(route)))?;

        let linked = route.insert_stop(stop);
        let number = route.number().clone();
        let back_linked = self
            .stops
            .get_mut(stop)
            .is_some_and(|s| s.insert_route(number));
        debug_assert_eq!(linked, back_linked, "route and stop links diverged");

        Ok(linked)
    }

    /// Remove the link between a stop and a route in both directions.
    ///
    /// Returns `Ok(false)` if they were not linked.
    pub fn remove_stop_from_route(&mut self, route: &str, stop: StopNumber) -> Result<bool> {
        if !self.stops.contains(stop) {
            return Err(TransitError::StopNotFound(stop));
        }
        let route = self
            .routes
            .get_mut(route)
            .ok_or_else(|| TransitError::RouteNotFound(RouteNumber::new(route)))?;

        let unlinked = route.remove_stop(stop);
        let number = route.number().clone();
        let back_unlinked = self
            .stops
            .get_mut(stop)
            .is_some_and(|s| s.remove_route(&number));
        debug_assert_eq!(unlinked, back_unlinked, "route and stop links diverged");

        Ok(unlinked)
    }

    pub fn route_has_stop(&self, route: &str, stop: StopNumber) -> bool {
        self.routes.get(route).is_some_and(|r| r.has_stop(stop))
    }

    /// Routes serving a stop, in the order they were linked
    pub fn routes_serving(&self, stop: StopNumber) -> Vec<&Route> {
        self.stops
            .get(stop)
            .map(|s| s.routes().iter().filter_map(|r| self.routes.get(r.as_str())).collect())
            .unwrap_or_default()
    }

    /// Stops on a route, in the order they were added
    pub fn stops_on_route(&self, route: &str) -> Vec<&Stop> {
        self.routes
            .get(route)
            .map(|r| r.stops().iter().filter_map(|s| self.stops.get(*s)).collect())
            .unwrap_or_default()
    }

    // ---- Spatial queries ----

    pub fn find_nearest_stop(&self, point: LatLon) -> Option<&Stop> {
        self.stops.find_nearest_to(point)
    }

    pub fn stops_in_rect(&self, north_west: LatLon, south_east: LatLon) -> Vec<&Stop> {
        self.stops.stops_in_rect(north_west, south_east)
    }

    /// Patterns whose path passes through a north-west/south-east map rectangle
    pub fn patterns_in_rect(&self, north_west: LatLon, south_east: LatLon) -> Vec<&RoutePattern> {
        self.routes
            .iter()
            .flat_map(|route| route.patterns())
            .filter(|pattern| pattern.intersects_rect(north_west, south_east))
            .collect()
    }

    // ---- Teardown ----

    /// Drop every stop and strip stop numbers from every route
    pub fn clear_stops(&mut self) {
        self.stops.clear();
        for route in self.routes.iter_mut() {
            route.clear_stops();
        }
    }

    /// Drop every route and strip route numbers from every stop
    pub fn clear_routes(&mut self) {
        self.routes.clear();
        for stop in self.stops.iter_mut() {
            stop.clear_routes();
        }
    }

    pub fn clear(&mut self) {
        self.stops.clear();
        self.routes.clear();
    }
}

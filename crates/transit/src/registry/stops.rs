//! Registry of every known stop.

use std::collections::hash_map::{Entry, HashMap};
use std::fmt;

use rstar::RTree;
use tracing::debug;

use crate::config::NetworkConfig;
use crate::identifiers::*;
use crate::models::{stop::Stop, types::*};
use crate::spatial::geometry::{distance_between, rectangle_contains_point};
use crate::spatial::index::{rect_envelope, StopNode};

/// Stops keyed by stop number, with a spatial index and a selected stop.
///
/// A stop's location is fixed when it is first registered, so the R-tree only
/// ever grows until the registry is cleared.
pub struct StopRegistry {
    stops: HashMap<StopNumber, Stop>,
    stop_tree: RTree<StopNode>,
    selected: Option<StopNumber>,
    nearest_radius_m: f64,
    placeholder_location: LatLon,
}

impl StopRegistry {
    pub fn new() -> Self {
        Self::with_config(&NetworkConfig::default())
    }

    pub fn with_config(config: &NetworkConfig) -> Self {
        Self {
            stops: HashMap::new(),
            stop_tree: RTree::new(),
            selected: None,
            nearest_radius_m: config.nearest_stop_radius_m,
            placeholder_location: config.placeholder_location,
        }
    }

    /// Get the stop with this number, registering it with an empty name and
    /// the placeholder location if it is unknown.
    pub fn get_or_create(&mut self, number: StopNumber) -> &mut Stop {
        let location = self.placeholder_location;
        self.get_or_create_with(number, "", location)
    }

    /// Get the stop with this number, registering it with the given name and
    /// location if it is unknown. An existing stop is returned unchanged.
    pub fn get_or_create_with(&mut self, number: StopNumber, name: &str, location: LatLon) -> &mut Stop {
        match self.stops.entry(number) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!(stop = %number, name, %location, "registering stop");
                self.stop_tree.insert(StopNode::new(location, number));
                entry.insert(Stop::new(number, name, location))
            }
        }
    }

    pub fn get(&self, number: StopNumber) -> Option<&Stop> {
        self.stops.get(&number)
    }

    pub fn get_mut(&mut self, number: StopNumber) -> Option<&mut Stop> {
        self.stops.get_mut(&number)
    }

    pub fn contains(&self, number: StopNumber) -> bool {
        self.stops.contains_key(&number)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// All stops, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Stop> {
        self.stops.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Stop> {
        self.stops.values_mut()
    }

    /// Drop every stop and the selection
    pub(crate) fn clear(&mut self) {
        self.stops.clear();
        self.stop_tree = RTree::new();
        self.selected = None;
    }

    pub fn nearest_radius_m(&self) -> f64 {
        self.nearest_radius_m
    }

    /// The stop closest to `point`, if it is strictly within the nearest-stop
    /// radius.
    ///
    /// Every stop is measured with Haversine distance. On an exact tie the
    /// first stop visited wins, and visiting order follows the hash map, so
    /// ties are not deterministic.
    pub fn find_nearest_to(&self, point: LatLon) -> Option<&Stop> {
        let mut nearest = None;
        let mut closest = self.nearest_radius_m;

        for stop in self.stops.values() {
            let distance = distance_between(stop.location(), point);
            if distance < closest {
                nearest = Some(stop);
                closest = distance;
            }
        }

        nearest
    }

    /// Stops inside a north-west/south-east map rectangle, boundary included
    pub fn stops_in_rect(&self, north_west: LatLon, south_east: LatLon) -> Vec<&Stop> {
        let envelope = rect_envelope(north_west, south_east);

        self.stop_tree
            .locate_in_envelope(&envelope)
            .filter_map(|node| self.stops.get(&node.stop))
            .filter(|stop| rectangle_contains_point(north_west, south_east, stop.location()))
            .collect()
    }

    pub fn selected(&self) -> Option<&Stop> {
        self.selected.and_then(|number| self.stops.get(&number))
    }

    /// Select a registered stop.
    ///
    /// Fails with [`TransitError::NotRegistered`] if the registry does not
    /// hold the stop; the previous selection is kept in that case.
    pub fn set_selected(&mut self, number: StopNumber) -> Result<()> {
        if !self.stops.contains_key(&number) {
            return Err(TransitError::NotRegistered(number));
        }
        self.selected = Some(number);
        Ok(())
    }

    pub fn clear_selected(&mut self) {
        self.selected = None;
    }
}

impl Default for StopRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StopRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopRegistry")
            .field("stops", &self.stops.len())
            .field("selected", &self.selected)
            .field("nearest_radius_m", &self.nearest_radius_m)
            .finish()
    }
}

//! Registry of every known route.

use std::collections::hash_map::{Entry, HashMap};

use tracing::debug;

use crate::identifiers::*;
use crate::models::route::Route;

/// Routes keyed by route number
#[derive(Debug, Default)]
pub struct RouteRegistry {
    routes: HashMap<RouteNumber, Route>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the route with this number, registering it with an empty name if
    /// it is unknown.
    pub fn get_or_create(&mut self, number: impl Into<RouteNumber>) -> &mut Route {
        self.get_or_create_with(number, "")
    }

    /// Get the route with this number, registering it with the given name if
    /// it is unknown. An existing route keeps its name.
    pub fn get_or_create_with(&mut self, number: impl Into<RouteNumber>, name: &str) -> &mut Route {
        match self.routes.entry(number.into()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!(route = %entry.key(), name, "registering route");
                let number = entry.key().clone();
                entry.insert(Route::new(number, name))
            }
        }
    }

    pub fn get(&self, number: &str) -> Option<&Route> {
        self.routes.get(number)
    }

    pub fn get_mut(&mut self, number: &str) -> Option<&mut Route> {
        self.routes.get_mut(number)
    }

    pub fn contains(&self, number: &str) -> bool {
        self.routes.contains_key(number)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All routes, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Route> {
        self.routes.values_mut()
    }

    pub(crate) fn clear(&mut self) {
        self.routes.clear();
    }
}

//! R-tree nodes for spatial indexing of stops.
//!
//! The tree works in raw degrees (x = longitude, y = latitude). It only
//! answers rectangle queries, which are planar in this crate anyway; anything
//! distance based goes through Haversine in [`super::geometry`].

use rstar::{RTreeObject, AABB};

use crate::identifiers::StopNumber;
use crate::models::types::LatLon;

#[derive(Clone, Debug, PartialEq)]
pub struct StopNode {
    pub stop: StopNumber,
    point: [f64; 2],
}

impl StopNode {
    pub fn new(location: LatLon, stop: StopNumber) -> Self {
        Self {
            stop,
            point: [location.longitude(), location.latitude()],
        }
    }
}

impl RTreeObject for StopNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

/// Envelope covering a north-west/south-east map rectangle
pub fn rect_envelope(north_west: LatLon, south_east: LatLon) -> AABB<[f64; 2]> {
    AABB::from_corners(
        [north_west.longitude(), south_east.latitude()],
        [south_east.longitude(), north_west.latitude()],
    )
}

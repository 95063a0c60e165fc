//! Distance and map-rectangle calculations.
//!
//! Distances use the Haversine formula on a spherical Earth. Rectangle tests
//! work in plain degrees and take the rectangle as its north-west and
//! south-east corners, exactly as a map viewport reports them: latitude grows
//! northward, longitude grows eastward. Corners are never re-sorted, so a
//! rectangle whose north edge lies below its south edge is empty.

use geo::{HaversineDistance, Point};

use crate::models::types::LatLon;

/// Great-circle distance between two points in meters
pub fn distance_between(a: LatLon, b: LatLon) -> f64 {
    Point::from(a).haversine_distance(&Point::from(b))
}

/// Whether `point` lies in the rectangle, boundary included
pub fn rectangle_contains_point(north_west: LatLon, south_east: LatLon, point: LatLon) -> bool {
    point.latitude() >= south_east.latitude()
        && point.latitude() <= north_west.latitude()
        && point.longitude() >= north_west.longitude()
        && point.longitude() <= south_east.longitude()
}

/// Whether the segment `src`-`dst` touches the rectangle's boundary or interior.
///
/// Uses Liang-Barsky clipping, so vertical and horizontal segments need no
/// slope and never divide by zero: a direction component of zero only checks
/// that the segment sits inside that axis' slab. A zero-length segment is a
/// point and falls back to [`rectangle_contains_point`]. A segment with a
/// non-finite endpoint intersects nothing.
pub fn rectangle_intersects_line(
    north_west: LatLon,
    south_east: LatLon,
    src: LatLon,
    dst: LatLon,
) -> bool {
    let (min_x, max_x) = (north_west.longitude(), south_east.longitude());
    let (min_y, max_y) = (south_east.latitude(), north_west.latitude());

    // Inverted or NaN corners describe an empty rectangle
    if !(min_x <= max_x && min_y <= max_y) {
        return false;
    }

    let (x1, y1) = (src.longitude(), src.latitude());
    let (x2, y2) = (dst.longitude(), dst.latitude());

    // Non-finite endpoints intersect nothing
    if ![x1, y1, x2, y2].iter().all(|c| c.is_finite()) {
        return false;
    }

    // Whole segment on one side of the rectangle
    if (x1 < min_x && x2 < min_x)
        || (x1 > max_x && x2 > max_x)
        || (y1 < min_y && y2 < min_y)
        || (y1 > max_y && y2 > max_y)
    {
        return false;
    }

    let dx = x2 - x1;
    let dy = y2 - y1;

    if dx == 0.0 && dy == 0.0 {
        return rectangle_contains_point(north_west, south_east, src);
    }

    let mut t_enter = 0.0_f64;
    let mut t_exit = 1.0_f64;

    for (p, q) in [
        (-dx, x1 - min_x),
        (dx, max_x - x1),
        (-dy, y1 - min_y),
        (dy, max_y - y1),
    ] {
        if p == 0.0 {
            // Parallel to this edge
            if q < 0.0 {
                return false;
            }
            continue;
        }

        let t = q / p;
        if p < 0.0 {
            if t > t_exit {
                return false;
            }
            t_enter = t_enter.max(t);
        } else {
            if t < t_enter {
                return false;
            }
            t_exit = t_exit.min(t);
        }
    }

    t_enter <= t_exit
}

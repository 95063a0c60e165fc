//! Geometry and spatial indexing.

pub mod geometry;
pub mod index;

pub use geometry::{distance_between, rectangle_contains_point, rectangle_intersects_line};

//! # translink-transit
//!
//! In-memory bus network model built from transit agency feeds.
//!
//! ## Features
//!
//! - **Registries**: stops and routes with get-or-create identity semantics
//! - **Consistent links**: route/stop membership is kept in step on both sides
//! - **Feed parsers**: routes, stops, real-time arrivals and compact route maps
//! - **Spatial queries**: nearest stop, map-bounds filtering of stops and paths
//! - **Pluggable sources**: parsers read from any [`DataSource`]
//!
//! ## Example
//!
//! ```
//! use translink_transit::prelude::*;
//!
//! let mut network = TransitNetwork::new();
//!
//! parse_routes(
//!     &mut network,
//!     r#"[{ "RouteNo": "099", "Name": "COMMERCIAL-BROADWAY/UBC (B-LINE)",
//!           "Patterns": [{ "PatternNo": "WB1", "Destination": "UBC", "Direction": "WEST" }] }]"#,
//! )
//! .unwrap();
//!
//! parse_stops(
//!     &mut network,
//!     r#"[{ "StopNo": 51479, "Name": "WB W BROADWAY FS CAMBIE ST",
//!           "Latitude": 49.2631, "Longitude": -123.1149, "Routes": "099" }]"#,
//! )
//! .unwrap();
//!
//! let nearest = network.find_nearest_stop(LatLon::new(49.2630, -123.1150)).unwrap();
//! assert_eq!(nearest.number(), StopNumber::new(51479));
//! assert!(network.route_has_stop("099", nearest.number()));
//! ```

pub mod config;
pub mod feed;
pub mod identifiers;
pub mod models;
pub mod registry;
pub mod source;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::config::NetworkConfig;
    pub use crate::feed::{
        parse_arrival_records, parse_arrivals, parse_route_map, parse_route_map_str,
        parse_route_records, parse_routes, parse_stop_records, parse_stops, RouteFeedSummary,
        StopFeedSummary,
    };
    pub use crate::identifiers::*;
    pub use crate::models::{
        Arrival, LatLon, Result, Route, RoutePattern, ShapeLineError, Stop, TransitError,
    };
    pub use crate::registry::{RouteRegistry, StopRegistry, TransitNetwork};
    pub use crate::source::{DataSource, FileDataSource};
    pub use crate::spatial::{distance_between, rectangle_contains_point, rectangle_intersects_line};
}

pub use prelude::*;

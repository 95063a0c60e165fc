//! Transit entities: stops, routes, patterns and arrivals.

pub mod route;
pub mod stop;
pub mod types;

// Re-exports for convenience
pub use route::{Route, RoutePattern};
pub use stop::Stop;
pub use types::{Arrival, LatLon, Result, ShapeLineError, TransitError};

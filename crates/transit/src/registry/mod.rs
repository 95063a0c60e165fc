//! Stop and route registries and the network context that owns them.

pub mod network;
pub mod routes;
pub mod stops;

pub use network::TransitNetwork;
pub use routes::RouteRegistry;
pub use stops::StopRegistry;

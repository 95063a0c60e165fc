//! Feed parsers.
//!
//! Each parser takes already-decoded records and applies them to a
//! [`TransitNetwork`](crate::registry::TransitNetwork). The `parse` entry
//! points decode JSON from a [`DataSource`] first; the `parse_records` ones
//! accept records from any decoder.

pub mod arrivals;
pub mod records;
pub mod route_map;
pub mod routes;
pub mod stops;

use serde::de::DeserializeOwned;

use crate::models::types::Result;
use crate::source::DataSource;

pub use arrivals::{parse_arrival_records, parse_arrivals};
pub use route_map::{parse_route_map, parse_route_map_str};
pub use routes::{parse_route_records, parse_routes, RouteFeedSummary};
pub use stops::{parse_stop_records, parse_stops, StopFeedSummary};

/// Decode a JSON array of records
pub fn decode_records<T, S>(source: &S) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    S: DataSource + ?Sized,
{
    let bytes = source.read_bytes()?;
    Ok(serde_json::from_slice(&bytes)?)
}

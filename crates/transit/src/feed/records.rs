//! Decoded feed records.
//!
//! Every field is optional so that a missing field decodes to `None` instead
//! of failing the whole document; each parser then validates the fields it
//! needs in one place. Fields the parsers do not use are ignored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

// ============================================================================
// Routes
// ============================================================================

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RouteRecord {
    #[serde(rename = "RouteNo")]
    pub route_no: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Patterns")]
    pub patterns: Option<Vec<PatternRecord>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PatternRecord {
    #[serde(rename = "PatternNo")]
    pub pattern_no: Option<String>,
    #[serde(rename = "Destination")]
    pub destination: Option<String>,
    #[serde(rename = "Direction")]
    pub direction: Option<String>,
}

// ============================================================================
// Stops
// ============================================================================

#[derive(Clone, Debug, Default, Deserialize)]
pub struct StopRecord {
    #[serde(rename = "StopNo")]
    pub stop_no: Option<u32>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
    /// Comma-separated route numbers, e.g. "004, 007"
    #[serde(rename = "Routes")]
    pub routes: Option<String>,
}

// ============================================================================
// Arrivals
// ============================================================================

/// Upcoming buses of one route at a stop.
///
/// Arrival data is noisy, so these fields decode leniently: a value of the
/// wrong type counts as missing rather than failing the document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ArrivalGroupRecord {
    #[serde(rename = "RouteNo", default, deserialize_with = "lenient")]
    pub route_no: Option<String>,
    #[serde(rename = "Schedules", default, deserialize_with = "lenient")]
    pub schedules: Option<Vec<ScheduleRecord>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ScheduleRecord {
    /// Minutes until the bus arrives
    #[serde(rename = "ExpectedCountdown", default, deserialize_with = "lenient")]
    pub expected_countdown: Option<i32>,
    #[serde(rename = "Destination", default, deserialize_with = "lenient")]
    pub destination: Option<String>,
    #[serde(rename = "ScheduleStatus", default, deserialize_with = "lenient")]
    pub schedule_status: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

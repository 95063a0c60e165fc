//! Tunables for a [`TransitNetwork`](crate::registry::TransitNetwork).

use serde::Deserialize;

use crate::models::types::{LatLon, Result, TransitError};

/// Stops further than this from a query point are never "nearest"
pub const DEFAULT_NEAREST_STOP_RADIUS_M: f64 = 10_000.0;

/// Location given to stops first referenced without one
pub const DEFAULT_PLACEHOLDER_LOCATION: LatLon = LatLon::new(49.12345, -123.12345);

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub nearest_stop_radius_m: f64,
    #[serde(with = "latlon_pair")]
    pub placeholder_location: LatLon,
}

impl NetworkConfig {
    /// Load from JSON; absent keys keep their defaults. The result is
    /// checked with [`NetworkConfig::validate`].
    ///
    /// ```
    /// use translink_transit::config::NetworkConfig;
    ///
    /// let config = NetworkConfig::from_json(r#"{ "nearest_stop_radius_m": 500.0 }"#).unwrap();
    /// assert_eq!(config.nearest_stop_radius_m, 500.0);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The radius must be positive and the placeholder a real coordinate
    pub fn validate(&self) -> Result<()> {
        if self.nearest_stop_radius_m.is_nan() || self.nearest_stop_radius_m <= 0.0 {
            return Err(TransitError::InvalidData(format!(
                "nearest_stop_radius_m must be positive, got {}",
                self.nearest_stop_radius_m
            )));
        }
        if !self.placeholder_location.is_valid() {
            return Err(TransitError::InvalidData(format!(
                "placeholder_location {} is not a valid coordinate",
                self.placeholder_location
            )));
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            nearest_stop_radius_m: DEFAULT_NEAREST_STOP_RADIUS_M,
            placeholder_location: DEFAULT_PLACEHOLDER_LOCATION,
        }
    }
}

/// `[lat, lon]` on the wire
mod latlon_pair {
    use serde::{Deserialize, Deserializer};

    use crate::models::types::LatLon;

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<LatLon, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [latitude, longitude] = <[f64; 2]>::deserialize(deserializer)?;
        Ok(LatLon::new(latitude, longitude))
    }
}

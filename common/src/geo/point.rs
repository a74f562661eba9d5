use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::geometry::{self, Position};

/// A WGS84 location in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// The point in GeoJSON axis order.
    pub fn lon_lat(&self) -> Position {
        [self.longitude, self.latitude]
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        geometry::haversine_distance_km(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

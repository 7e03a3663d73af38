use serde::{Deserialize, Serialize};
use std::fmt;

/// Approximate length of one degree of latitude.
pub const KM_PER_DEGREE: f64 = 111.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// Square search area in degrees, as the imagery catalog expects it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Box spanning `radius_km` in every direction from `center`, using
    /// 1 degree ≈ 111 km for both axes.
    #[must_use]
    pub fn around(center: Coordinate, radius_km: f64) -> Self {
        let margin = radius_km / KM_PER_DEGREE;
        Self {
            min_lon: center.longitude - margin,
            min_lat: center.latitude - margin,
            max_lon: center.longitude + margin,
            max_lat: center.latitude + margin,
        }
    }

    /// `lon_min,lat_min,lon_max,lat_max`
    #[must_use]
    pub fn to_query_param(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

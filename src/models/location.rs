//! Geographic point model and distance helpers

use haversine::{Location as HaversineLocation, Units, distance};
use serde::{Deserialize, Serialize};

use crate::{Result, WanderLensError};

/// A point on the globe
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point, rejecting out-of-range coordinates
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(WanderLensError::validation(format!(
                "Latitude must be between -90 and 90, got: {latitude}"
            )));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(WanderLensError::validation(format!(
                "Longitude must be between -180 and 180, got: {longitude}"
            )));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Format point as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Great-circle distance in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let from = HaversineLocation {
            latitude: self.latitude,
            longitude: self.longitude,
        };
        let to = HaversineLocation {
            latitude: other.latitude,
            longitude: other.longitude,
        };
        distance(from, to, Units::Kilometers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range() {
        assert!(GeoPoint::new(91.0, 8.0).is_err());
        assert!(GeoPoint::new(-46.0, -181.0).is_err());
        assert!(GeoPoint::new(46.8182, 8.2275).is_ok());
    }

    #[test]
    fn test_format_coordinates() {
        let point = GeoPoint::new(46.818_234, 8.227_456).unwrap();
        assert_eq!(point.format_coordinates(), "46.8182, 8.2275");
    }

    #[test]
    fn test_distance_km() {
        let lisbon = GeoPoint::new(38.7223, -9.1393).unwrap();
        let porto = GeoPoint::new(41.1579, -8.6291).unwrap();
        let d = lisbon.distance_km(&porto);
        assert!((270.0..=285.0).contains(&d), "unexpected distance {d}");
        assert_eq!(lisbon.distance_km(&lisbon), 0.0);
    }
}

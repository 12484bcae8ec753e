//! City insights model

use serde::{Deserialize, Serialize};

/// Geographic coordinates in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Coordinates as a `[lat, lon]` pair
    #[must_use]
    pub fn as_pair(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}

/// City insights after shape validation
#[derive(Debug, Clone, PartialEq)]
pub struct CityInfo {
    pub coordinates: Coordinates,
    pub population: u64,
    pub known_for: Vec<String>,
}

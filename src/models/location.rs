//! Location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a latitude/longitude pair is outside the valid range
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid coordinates: lat={latitude}, lon={longitude}")]
pub struct InvalidCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A geodetic position in decimal degrees
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if valid {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    /// Latitude in decimal degrees
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            latitude: f64,
            longitude: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Coordinate::new(raw.latitude, raw.longitude).map_err(serde::de::Error::custom)
    }
}

/// A geocoding match: where it is and what the provider called it
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Place {
    pub coordinate: Coordinate,
    pub name: Option<String>,
}

impl Place {
    #[must_use]
    pub fn new(coordinate: Coordinate, name: Option<String>) -> Self {
        Self { coordinate, name }
    }

    /// Provider name if present, coordinates otherwise
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.coordinate.format_coordinates())
    }
}

/// The fixed anchor all distances are measured against
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReferencePoint {
    pub name: String,
    pub coordinate: Coordinate,
}

impl ReferencePoint {
    #[must_use]
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }

    /// Cesano di Roma, a frazione of Roma Capitale
    #[must_use]
    pub fn cesano() -> Self {
        Self {
            name: "Cesano di Roma".to_string(),
            coordinate: Coordinate {
                latitude: 42.0413,
                longitude: 12.3308,
            },
        }
    }
}

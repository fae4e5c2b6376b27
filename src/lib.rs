//! Cesano Distance - how far is any place from Cesano di Roma?
//!
//! Geocodes a free-text place name and measures the great-circle distance
//! to a fixed reference point with the haversine formula.

pub mod api;
pub mod config;
pub mod distance;
pub mod error;
pub mod geocoding;
pub mod logging;
pub mod lookup;
pub mod models;
pub mod session;
pub mod web;

// Re-export core types for public API
pub use config::AppConfig;
pub use distance::{EARTH_RADIUS_KM, calculate_distance};
pub use error::{AppError, ErrorKind, LookupError};
pub use geocoding::{Geocoder, GeocodingFailure, NominatimClient, OpenMeteoClient};
pub use lookup::LookupService;
pub use models::{Coordinate, FormattedDistance, LookupQuery, LookupState, Place, ReferencePoint};
pub use session::{LookupSession, Presenter, TracingPresenter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

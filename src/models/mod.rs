//! Data models for the distance lookup
//!
//! - Location: coordinates, geocoding matches and the reference point
//! - Lookup: queries, formatted distances and the UI-facing lookup state

pub mod location;
pub mod lookup;

// Re-export all public types for convenient access
pub use location::{Coordinate, InvalidCoordinate, Place, ReferencePoint};
pub use lookup::{FormattedDistance, LookupQuery, LookupState, Resolution};

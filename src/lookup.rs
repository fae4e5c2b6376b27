//! Lookup Orchestration
//!
//! Turns a free-text place into a distance from the reference point:
//! `validate -> geocode -> compute -> format`, one attempt per call.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::distance::calculate_distance;
use crate::error::LookupError;
use crate::geocoding::{Geocoder, GeocodingFailure};
use crate::models::{FormattedDistance, LookupQuery, ReferencePoint, Resolution};

/// Service resolving place names to distances from a fixed reference point
#[derive(Clone)]
pub struct LookupService {
    geocoder: Arc<dyn Geocoder>,
    reference: ReferencePoint,
}

impl LookupService {
    pub fn new(geocoder: Arc<dyn Geocoder>, reference: ReferencePoint) -> Self {
        Self {
            geocoder,
            reference,
        }
    }

    #[must_use]
    pub fn reference(&self) -> &ReferencePoint {
        &self.reference
    }

    /// Formatted distance between the reference point and the queried place
    pub async fn resolve_distance(&self, raw_query: &str) -> Result<FormattedDistance, LookupError> {
        self.resolve(raw_query).await.map(|resolution| resolution.distance)
    }

    /// Like [`resolve_distance`](Self::resolve_distance), also returning the matched place
    #[instrument(skip(self), fields(reference = %self.reference.name))]
    pub async fn resolve(&self, raw_query: &str) -> Result<Resolution, LookupError> {
        let query = LookupQuery::parse(raw_query)?;
        self.resolve_query(&query).await
    }

    /// Geocode an already validated query and measure it
    pub async fn resolve_query(&self, query: &LookupQuery) -> Result<Resolution, LookupError> {
        debug!(
            "Geocoding '{}' via {}",
            query,
            self.geocoder.provider_name()
        );

        let place = self
            .geocoder
            .geocode(query)
            .await
            .map_err(|failure| classify_failure(query, failure))?
            .ok_or_else(|| {
                debug!("No match for '{}'", query);
                LookupError::not_found(query.as_str())
            })?;

        let km = calculate_distance(&self.reference.coordinate, &place.coordinate);
        let distance = FormattedDistance::from_km(km);

        debug!(
            "{} is {} from {}",
            place.display_name(),
            distance,
            self.reference.name
        );

        Ok(Resolution { place, distance })
    }
}

fn classify_failure(query: &LookupQuery, failure: GeocodingFailure) -> LookupError {
    warn!("Geocoding '{}' failed: {}", query, failure);
    LookupError::service_unavailable(failure.to_string())
}

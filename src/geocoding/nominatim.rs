//! OpenStreetMap Nominatim geocoding

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::{Geocoder, GeocodingFailure, fetch_json, trim_base_url};
use crate::models::{Coordinate, LookupQuery, Place};

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// One entry of a Nominatim `/search?format=json` answer.
/// Coordinates arrive as decimal strings.
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub lat: String,
    pub lon: String,
    pub display_name: Option<String>,
}

impl TryFrom<SearchResult> for Place {
    type Error = GeocodingFailure;

    fn try_from(result: SearchResult) -> Result<Self, Self::Error> {
        let lat: f64 = result.lat.trim().parse().map_err(|_| {
            GeocodingFailure::InvalidResponse(format!("latitude '{}' is not a number", result.lat))
        })?;
        let lon: f64 = result.lon.trim().parse().map_err(|_| {
            GeocodingFailure::InvalidResponse(format!("longitude '{}' is not a number", result.lon))
        })?;
        let coordinate =
            Coordinate::new(lat, lon).map_err(|e| GeocodingFailure::InvalidResponse(e.to_string()))?;

        Ok(Place::new(coordinate, result.display_name))
    }
}

pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: trim_base_url(base_url),
        }
    }

    fn search_url(&self, query: &LookupQuery) -> String {
        format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query.as_str())
        )
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    #[instrument(skip(self), fields(provider = "nominatim"))]
    async fn geocode(&self, query: &LookupQuery) -> Result<Option<Place>, GeocodingFailure> {
        info!("Geocoding location: '{}'", query);

        let results: Vec<SearchResult> = fetch_json(&self.client, &self.search_url(query)).await?;

        let Some(first) = results.into_iter().next() else {
            warn!("No results found for location '{}'", query);
            return Ok(None);
        };

        let place = Place::try_from(first)?;
        debug!(
            "Found location: {} ({})",
            place.display_name(),
            place.coordinate.format_coordinates()
        );
        Ok(Some(place))
    }

    fn provider_name(&self) -> &'static str {
        "nominatim"
    }
}

//! Open-Meteo geocoding (no API key required)

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use super::{Geocoder, GeocodingFailure, fetch_json, trim_base_url};
use crate::models::{Coordinate, LookupQuery, Place};

pub const DEFAULT_BASE_URL: &str = "https://geocoding-api.open-meteo.com";

/// Geocoding response from `OpenMeteo`; `results` is absent when nothing matched
#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
    pub admin1: Option<String>,
}

impl GeocodingResult {
    fn label(&self) -> String {
        [Some(self.name.as_str()), self.admin1.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl TryFrom<GeocodingResult> for Place {
    type Error = GeocodingFailure;

    fn try_from(result: GeocodingResult) -> Result<Self, Self::Error> {
        let coordinate = Coordinate::new(result.latitude, result.longitude)
            .map_err(|e| GeocodingFailure::InvalidResponse(e.to_string()))?;
        Ok(Place::new(coordinate, Some(result.label())))
    }
}

pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: trim_base_url(base_url),
        }
    }

    fn search_url(&self, query: &LookupQuery) -> String {
        format!(
            "{}/v1/search?name={}&count=1&language=en&format=json",
            self.base_url,
            urlencoding::encode(query.as_str())
        )
    }
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    #[instrument(skip(self), fields(provider = "open-meteo"))]
    async fn geocode(&self, query: &LookupQuery) -> Result<Option<Place>, GeocodingFailure> {
        info!("Geocoding location: '{}'", query);

        let response: GeocodingResponse = fetch_json(&self.client, &self.search_url(query)).await?;

        match response.results.unwrap_or_default().into_iter().next() {
            Some(first) => Place::try_from(first).map(Some),
            None => {
                warn!("No results found for location '{}'", query);
                Ok(None)
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "open-meteo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url() {
        let client = OpenMeteoClient::new(Client::new(), DEFAULT_BASE_URL);
        let query = LookupQuery::parse("Gornau/Erz").unwrap();
        assert_eq!(
            client.search_url(&query),
            "https://geocoding-api.open-meteo.com/v1/search?name=Gornau%2FErz&count=1&language=en&format=json"
        );
    }

    #[test]
    fn test_missing_results_is_empty() {
        let response: GeocodingResponse = serde_json::from_str(r#"{"generationtime_ms": 0.5}"#).unwrap();
        assert!(response.results.is_none());
    }

    #[test]
    fn test_label_joins_known_parts() {
        let body = r#"{"results": [{"name": "Interlaken", "latitude": 46.68387, "longitude": 7.86638, "country": "Switzerland", "admin1": "Bern"}]}"#;
        let response: GeocodingResponse = serde_json::from_str(body).unwrap();
        let place = Place::try_from(response.results.unwrap().remove(0)).unwrap();
        assert_eq!(place.name.as_deref(), Some("Interlaken, Bern, Switzerland"));
    }
}

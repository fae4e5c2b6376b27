//! Geocoding collaborators
//!
//! A [`Geocoder`] turns a free-text query into at most one best-match [`Place`].
//! Providers report raw failures as [`GeocodingFailure`]; classifying them into
//! user-facing lookup errors is the orchestrator's job.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{GeocodingConfig, GeocodingProvider};
use crate::models::{LookupQuery, Place};

pub mod nominatim;
pub mod open_meteo;

pub use nominatim::NominatimClient;
pub use open_meteo::OpenMeteoClient;

/// Raw failure from a geocoding provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeocodingFailure {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("provider answered HTTP {0}")]
    Status(u16),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Resolves place names to coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Best match for the query, `None` when the provider knows no such place
    async fn geocode(&self, query: &LookupQuery) -> std::result::Result<Option<Place>, GeocodingFailure>;

    /// Provider name for logs
    fn provider_name(&self) -> &'static str;
}

/// Build the configured provider
pub fn from_config(config: &GeocodingConfig) -> Result<Arc<dyn Geocoder>> {
    let client = build_client(config)?;
    let geocoder: Arc<dyn Geocoder> = match config.provider {
        GeocodingProvider::Nominatim => Arc::new(NominatimClient::new(client, config.base_url())),
        GeocodingProvider::OpenMeteo => Arc::new(OpenMeteoClient::new(client, config.base_url())),
    };
    info!(
        "Using {} geocoding at {}",
        geocoder.provider_name(),
        config.base_url()
    );
    Ok(geocoder)
}

/// HTTP client with the configured transport timeout and user agent
pub fn build_client(config: &GeocodingConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds.into()))
        .user_agent(config.user_agent.clone())
        .build()
        .with_context(|| "Failed to create HTTP client")
}

/// Single GET, no retry. Non-success statuses and undecodable bodies are failures.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
) -> std::result::Result<T, GeocodingFailure> {
    let start_time = Instant::now();
    debug!("Geocoding request URL: {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| GeocodingFailure::Transport(e.to_string()))?;

    let status = response.status();
    debug!(
        "HTTP response received: {} in {:.3}s",
        status,
        start_time.elapsed().as_secs_f64()
    );

    if !status.is_success() {
        warn!("Geocoding provider answered {}", status);
        return Err(GeocodingFailure::Status(status.as_u16()));
    }

    let body = response
        .json::<T>()
        .await
        .map_err(|e| GeocodingFailure::InvalidResponse(e.to_string()))?;

    let total_duration = start_time.elapsed();
    if total_duration.as_secs() > 5 {
        warn!(
            "Slow geocoding response: {:.3}s",
            total_duration.as_secs_f64()
        );
    }

    Ok(body)
}

/// Strip a trailing slash so paths can be appended with `/`
pub(crate) fn trim_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_trim_base_url() {
        assert_eq!(
            trim_base_url("https://nominatim.openstreetmap.org/"),
            "https://nominatim.openstreetmap.org"
        );
        assert_eq!(trim_base_url("http://localhost:8080"), "http://localhost:8080");
    }

    #[test]
    fn test_from_config_picks_provider() {
        let mut config = AppConfig::default();
        let geocoder = from_config(&config.geocoding).unwrap();
        assert_eq!(geocoder.provider_name(), "nominatim");

        config.geocoding.provider = GeocodingProvider::OpenMeteo;
        let geocoder = from_config(&config.geocoding).unwrap();
        assert_eq!(geocoder.provider_name(), "open-meteo");
    }
}

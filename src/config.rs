//! Configuration management
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::geocoding::{nominatim, open_meteo};
use crate::models::{Coordinate, ReferencePoint};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "CESANO_CONFIG";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Anchor location all distances are measured against
    pub reference: ReferenceConfig,
    /// Geocoding provider settings
    pub geocoding: GeocodingConfig,
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Presentation policy
    pub presentation: PresentationConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeocodingProvider {
    Nominatim,
    OpenMeteo,
}

impl GeocodingProvider {
    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            GeocodingProvider::Nominatim => nominatim::DEFAULT_BASE_URL,
            GeocodingProvider::OpenMeteo => open_meteo::DEFAULT_BASE_URL,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    pub provider: GeocodingProvider,
    /// Base URL; unset or empty means the provider's public endpoint
    pub base_url: Option<String>,
    /// Nominatim's usage policy requires an identifying user agent
    pub user_agent: String,
    /// Transport timeout in seconds
    pub timeout_seconds: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Minimum time a lookup stays in the loading state, in milliseconds
    pub min_display_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_user_agent() -> String {
    format!("CesanoDistance/{}", env!("CARGO_PKG_VERSION"))
}

fn default_geocoding_timeout() -> u32 {
    10
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_min_display_ms() -> u64 {
    2000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        let cesano = ReferencePoint::cesano();
        Self {
            name: cesano.name,
            latitude: cesano.coordinate.latitude(),
            longitude: cesano.coordinate.longitude(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            provider: GeocodingProvider::Nominatim,
            base_url: None,
            user_agent: default_user_agent(),
            timeout_seconds: default_geocoding_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            min_display_ms: default_min_display_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ReferenceConfig {
    /// Build the validated reference point
    pub fn reference_point(&self) -> Result<ReferencePoint> {
        let coordinate = Coordinate::new(self.latitude, self.longitude)
            .map_err(|e| AppError::config(format!("Reference point: {e}")))?;
        Ok(ReferencePoint::new(self.name.clone(), coordinate))
    }
}

impl GeocodingConfig {
    /// Configured base URL, or the provider's public endpoint
    #[must_use]
    pub fn base_url(&self) -> &str {
        match self.base_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => self.provider.default_base_url(),
        }
    }
}

impl PresentationConfig {
    #[must_use]
    pub fn min_display(&self) -> Duration {
        Duration::from_millis(self.min_display_ms)
    }
}

impl ServerConfig {
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path
            .or_else(|| env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::get_config_path)
            .unwrap_or_else(|| PathBuf::from("config.toml"));

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. CESANO_SERVER__PORT=9000
        builder = builder.add_source(
            Environment::with_prefix("CESANO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cesano-distance").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.geocoding.user_agent.is_empty() {
            self.geocoding.user_agent = default_user_agent();
        }
        if self.geocoding.timeout_seconds == 0 {
            self.geocoding.timeout_seconds = default_geocoding_timeout();
        }
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.reference.reference_point()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.geocoding.timeout_seconds > 300 {
            return Err(AppError::config("Geocoding timeout cannot exceed 300 seconds").into());
        }

        if self.presentation.min_display_ms > 60_000 {
            return Err(AppError::config(
                "Minimum display duration cannot exceed 60000 ms",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AppError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AppError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let base_url = self.geocoding.base_url();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::config(
                "Geocoding base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.reference.name.trim().is_empty() {
            return Err(AppError::config("Reference point name cannot be empty").into());
        }

        Ok(())
    }
}

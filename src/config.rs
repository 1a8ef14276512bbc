//! Configuration management for the Skycast dashboard
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::SkycastError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable read when no API key is configured
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Root configuration structure for the Skycast application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkycastConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Fallback location used when geocoding fails
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Dashboard behaviour
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeather API key
    pub api_key: Option<String>,
    /// Base URL for the weather, forecast and air pollution endpoints
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Base URL for the OpenWeather geocoding endpoint
    #[serde(default = "default_geo_url")]
    pub geo_url: String,
    /// Base URL for the secondary (Nominatim) geocoder
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,
    /// Request timeout in seconds, applied to every external call
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Language for weather descriptions
    #[serde(default = "default_language")]
    pub language: String,
}

/// Default location settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Display label of the default location
    #[serde(default = "default_location_name")]
    pub location: String,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

/// Dashboard settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Maximum number of entries kept in the recent-search list
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Port for `skycast serve`
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_geo_url() -> String {
    "https://api.openweathermap.org/geo/1.0".to_string()
}

fn default_nominatim_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_language() -> String {
    "en".to_string()
}

fn default_location_name() -> String {
    "Mumbai, India".to_string()
}

fn default_latitude() -> f64 {
    19.0760
}

fn default_longitude() -> f64 {
    72.8777
}

fn default_history_limit() -> usize {
    10
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            geo_url: default_geo_url(),
            nominatim_url: default_nominatim_url(),
            timeout_seconds: default_weather_timeout(),
            language: default_language(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            location: default_location_name(),
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            port: default_port(),
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

impl SkycastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // SKYCAST_WEATHER__API_KEY, SKYCAST_DASHBOARD__PORT, ...
        builder = builder.add_source(
            Environment::with_prefix("SKYCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SkycastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        if config.weather.api_key.is_none() {
            config.weather.api_key = std::env::var(API_KEY_ENV).ok();
        }

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skycast").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.geo_url.is_empty() {
            self.weather.geo_url = default_geo_url();
        }
        if self.weather.nominatim_url.is_empty() {
            self.weather.nominatim_url = default_nominatim_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.weather.language.is_empty() {
            self.weather.language = default_language();
        }
        if self.defaults.location.is_empty() {
            self.defaults.location = default_location_name();
        }
        if self.dashboard.history_limit == 0 {
            self.dashboard.history_limit = default_history_limit();
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
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate the API key when one is present
    pub fn validate_api_key(&self) -> Result<()> {
        if let Some(api_key) = &self.weather.api_key {
            if api_key.trim().is_empty() {
                return Err(SkycastError::config(
                    "OpenWeather API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }

            if api_key.len() > 100 {
                return Err(SkycastError::config(
                    "OpenWeather API key appears to be invalid (too long). Please check your API key.",
                )
                .into());
            }
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 120 {
            return Err(SkycastError::config("Weather API timeout cannot exceed 120 seconds").into());
        }

        if !(-90.0..=90.0).contains(&self.defaults.latitude) {
            return Err(SkycastError::config(format!(
                "Default latitude must be between -90 and 90, got: {}",
                self.defaults.latitude
            ))
            .into());
        }

        if !(-180.0..=180.0).contains(&self.defaults.longitude) {
            return Err(SkycastError::config(format!(
                "Default longitude must be between -180 and 180, got: {}",
                self.defaults.longitude
            ))
            .into());
        }

        if self.dashboard.history_limit > 100 {
            return Err(SkycastError::config("Search history limit cannot exceed 100").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SkycastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SkycastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Weather API base URL", &self.weather.base_url),
            ("Geocoding base URL", &self.weather.geo_url),
            ("Nominatim base URL", &self.weather.nominatim_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(
                    SkycastError::config(format!("{name} must be a valid HTTP or HTTPS URL")).into(),
                );
            }
        }

        Ok(())
    }
}

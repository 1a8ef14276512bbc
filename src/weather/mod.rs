//! OpenWeather client
//!
//! Fetches current conditions, the 5-day/3-hour forecast and air quality.
//! Every call makes a single attempt bounded by the configured timeout and
//! returns a [`FetchResult`], leaving the fallback choice to the caller.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::error::{FetchFailure, FetchResult};
use crate::models::{AirQuality, CurrentConditions, ForecastSample};

pub mod fallback;
pub mod openweather;

pub use fallback::sample_current_conditions;

/// Number of 3-hour records requested from the forecast endpoint
pub const FORECAST_COUNT: u8 = 40;

const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

/// Measurement system passed to the provider
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Value of the `units` query parameter
    #[must_use]
    pub fn as_query(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    #[must_use]
    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    #[must_use]
    pub fn speed_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

/// Build the HTTP client shared by the weather and geocoding calls
pub(crate) fn http_client(timeout_seconds: u32) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(u64::from(timeout_seconds)))
        .user_agent(USER_AGENT)
        .build()
        .with_context(|| "Failed to create HTTP client")
}

/// Strip the API key from a URL before it is logged
pub(crate) fn redact(url: &str) -> &str {
    url.split("&appid=").next().unwrap_or(url)
}

/// GET `url` and decode the JSON body
pub(crate) async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> FetchResult<T> {
    let start_time = Instant::now();
    debug!("Request URL: {}", redact(url));

    let response = client.get(url).send().await.map_err(|e| {
        let e = e.without_url();
        warn!("Request to {} failed: {}", redact(url), e);
        FetchFailure::from(e)
    })?;

    let status = response.status();
    if !status.is_success() {
        warn!("Request to {} returned status {}", redact(url), status);
        return Err(FetchFailure::Status(status.as_u16()));
    }

    let body = response.json::<T>().await.map_err(|e| {
        let e = e.without_url();
        warn!("Failed to decode response from {}: {}", redact(url), e);
        FetchFailure::from(e)
    })?;

    let duration = start_time.elapsed();
    debug!("Request completed in {:.3}s", duration.as_secs_f64());
    if duration.as_secs() > 5 {
        warn!("Slow API response detected: {:.3}s", duration.as_secs_f64());
    }

    Ok(body)
}

/// Client for the OpenWeather data endpoints
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    language: String,
}

impl WeatherClient {
    /// Create a client; fails when no API key is configured
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                crate::SkycastError::config(format!(
                    "OpenWeather API key not found. Set weather.api_key or {}",
                    crate::config::API_KEY_ENV
                ))
            })?;

        Ok(Self {
            client: http_client(config.timeout_seconds)?,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        })
    }

    /// Current conditions at a point
    #[instrument(skip(self))]
    pub async fn current_weather(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> FetchResult<CurrentConditions> {
        info!("Getting current weather for coordinates: {:.4}, {:.4}", lat, lon);

        let url = format!(
            "{}/weather?lat={}&lon={}&units={}&lang={}&appid={}",
            self.base_url,
            lat,
            lon,
            units.as_query(),
            urlencoding::encode(&self.language),
            urlencoding::encode(&self.api_key)
        );

        let response: openweather::CurrentWeatherResponse = fetch_json(&self.client, &url).await?;
        let current = CurrentConditions::try_from(response)?;

        info!(
            "Current weather at {}: {:.1} ({})",
            current.place_name, current.temperature, current.description
        );
        Ok(current)
    }

    /// Up to 40 forecast samples at 3-hour spacing
    #[instrument(skip(self))]
    pub async fn forecast(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> FetchResult<Vec<ForecastSample>> {
        info!("Getting forecast for coordinates: {:.4}, {:.4}", lat, lon);

        let url = format!(
            "{}/forecast?lat={}&lon={}&units={}&cnt={}&appid={}",
            self.base_url,
            lat,
            lon,
            units.as_query(),
            FORECAST_COUNT,
            urlencoding::encode(&self.api_key)
        );

        let response: openweather::ForecastResponse = fetch_json(&self.client, &url).await?;
        let samples = response.into_samples()?;

        info!("Retrieved {} forecast samples", samples.len());
        Ok(samples)
    }

    /// Air quality index at a point
    #[instrument(skip(self))]
    pub async fn air_quality(&self, lat: f64, lon: f64) -> FetchResult<AirQuality> {
        info!("Getting air quality for coordinates: {:.4}, {:.4}", lat, lon);

        let url = format!(
            "{}/air_pollution?lat={}&lon={}&appid={}",
            self.base_url,
            lat,
            lon,
            urlencoding::encode(&self.api_key)
        );

        let response: openweather::AirPollutionResponse = fetch_json(&self.client, &url).await?;
        let air_quality = response.into_air_quality()?;

        debug!("Air quality index: {}", air_quality.aqi);
        Ok(air_quality)
    }
}

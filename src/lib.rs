//! Skycast - weather dashboard
//!
//! Resolves a place, fetches current conditions, the 3-hourly forecast and
//! air quality from OpenWeather, and condenses the forecast into a 7-entry
//! hourly strip and a per-day summary.

pub mod aggregation;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod geocoding;
pub mod location_resolver;
pub mod models;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use aggregation::{derive_daily, derive_hourly};
pub use config::SkycastConfig;
pub use dashboard::{Dashboard, DashboardView, Event};
pub use error::{FetchFailure, FetchResult, SkycastError};
pub use geocoding::{Geocoder, NominatimGeocoder, OpenWeatherGeocoder};
pub use location_resolver::{LocationInput, LocationParser, LocationResolver, Resolution};
pub use models::{AirQuality, CurrentConditions, DailyEntry, ForecastSample, HourlyEntry, Location};
pub use weather::{Units, WeatherClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkycastError>;

//! Data models for the Skycast dashboard
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and display label
//! - Weather: Current conditions
//! - Forecast: Raw forecast samples and the derived hourly/daily entries
//! - Air quality: AQI index and its display levels

pub mod air_quality;
pub mod forecast;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use air_quality::{AirQuality, AqiLevel};
pub use forecast::{DailyEntry, ForecastSample, HourlyEntry};
pub use location::Location;
pub use weather::CurrentConditions;

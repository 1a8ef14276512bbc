//! Location Resolution Module
//!
//! Turns user input (coordinates or a place name) into a `Location`. Names go
//! to the primary geocoder, then the secondary one, and finally fall back to
//! the configured default location. Resolution never fails.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::SkycastError;
use crate::config::SkycastConfig;
use crate::geocoding::{Geocoder, NominatimGeocoder, OpenWeatherGeocoder};
use crate::models::Location;

/// Parsed form of a location query
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    /// Latitude and longitude in decimal degrees
    Coordinates(f64, f64),
    /// Free-text place name
    Name(String),
}

/// Parser for location input strings
pub struct LocationParser;

impl LocationParser {
    /// Parse input as coordinates when possible, otherwise as a place name
    #[must_use]
    pub fn parse(input: &str) -> LocationInput {
        let input = input.trim();

        match Self::parse_coordinates(input) {
            Ok((lat, lon)) => LocationInput::Coordinates(lat, lon),
            Err(_) => LocationInput::Name(input.to_string()),
        }
    }

    /// Parse coordinates from string like "46.8182,8.2275" or "46.8182 8.2275"
    pub fn parse_coordinates(input: &str) -> crate::Result<(f64, f64)> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        let [lat, lon] = parts.as_slice() else {
            return Err(SkycastError::validation(
                "Coordinates must be in format 'lat,lon'",
            ));
        };

        let lat = lat
            .parse::<f64>()
            .map_err(|_| SkycastError::validation(format!("Invalid latitude: {lat}")))?;
        let lon = lon
            .parse::<f64>()
            .map_err(|_| SkycastError::validation(format!("Invalid longitude: {lon}")))?;

        if !(-90.0..=90.0).contains(&lat) {
            return Err(SkycastError::validation(format!(
                "Latitude must be between -90 and 90, got: {lat}"
            )));
        }

        if !(-180.0..=180.0).contains(&lon) {
            return Err(SkycastError::validation(format!(
                "Longitude must be between -180 and 180, got: {lon}"
            )));
        }

        Ok((lat, lon))
    }
}

/// Which step produced a resolved location
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    Coordinates,
    Primary,
    Secondary,
    Default,
}

/// Outcome of resolving one query
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub location: Location,
    pub source: ResolutionSource,
}

/// Service for resolving location inputs
pub struct LocationResolver {
    primary: Box<dyn Geocoder>,
    secondary: Box<dyn Geocoder>,
    default: Location,
}

impl LocationResolver {
    pub fn new(primary: Box<dyn Geocoder>, secondary: Box<dyn Geocoder>, default: Location) -> Self {
        Self {
            primary,
            secondary,
            default,
        }
    }

    /// OpenWeather first, Nominatim second, configured default last
    pub fn from_config(config: &SkycastConfig) -> anyhow::Result<Self> {
        Ok(Self::new(
            Box::new(OpenWeatherGeocoder::new(&config.weather)?),
            Box::new(NominatimGeocoder::new(&config.weather)?),
            default_location(config),
        ))
    }

    /// The location used when nothing else resolves
    #[must_use]
    pub fn default_location(&self) -> &Location {
        &self.default
    }

    /// Resolve a location input into a structured Location
    pub async fn resolve(&self, input: &str) -> Resolution {
        debug!("Resolving location input: {:?}", input);

        let name = match LocationParser::parse(input) {
            LocationInput::Coordinates(lat, lon) => {
                let mut location = Location::new(lat, lon, String::new());
                location.name = location.format_coordinates();
                return Resolution {
                    location,
                    source: ResolutionSource::Coordinates,
                };
            }
            LocationInput::Name(name) if name.is_empty() => return self.fallback(),
            LocationInput::Name(name) => name,
        };

        for (geocoder, source) in [
            (&self.primary, ResolutionSource::Primary),
            (&self.secondary, ResolutionSource::Secondary),
        ] {
            match geocoder.lookup(&name).await {
                Ok(location) => {
                    info!(
                        "Resolved '{}' via {} to {} ({:.4}, {:.4})",
                        name,
                        geocoder.name(),
                        location.name,
                        location.latitude,
                        location.longitude
                    );
                    return Resolution { location, source };
                }
                Err(e) => debug!("Geocoder {} failed for '{}': {}", geocoder.name(), name, e),
            }
        }

        warn!("Could not resolve '{}', using default location", name);
        self.fallback()
    }

    fn fallback(&self) -> Resolution {
        Resolution {
            location: self.default.clone(),
            source: ResolutionSource::Default,
        }
    }
}

/// Default location from configuration
#[must_use]
pub fn default_location(config: &SkycastConfig) -> Location {
    Location::new(
        config.defaults.latitude,
        config.defaults.longitude,
        config.defaults.location.clone(),
    )
}

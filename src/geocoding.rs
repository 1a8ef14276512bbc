//! Place-name lookup against OpenWeather and Nominatim

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::WeatherConfig;
use crate::error::{FetchFailure, FetchResult};
use crate::models::Location;
use crate::weather::openweather::GeocodingEntry;
use crate::weather::{fetch_json, http_client};

/// Resolves a free-text place name to its best match
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Best match for `query`; `FetchFailure::Empty` when nothing matches
    async fn lookup(&self, query: &str) -> FetchResult<Location>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// OpenWeather direct geocoding
pub struct OpenWeatherGeocoder {
    client: Client,
    geo_url: String,
    api_key: String,
}

impl OpenWeatherGeocoder {
    pub fn new(config: &WeatherConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(config.timeout_seconds)?,
            geo_url: config.geo_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().unwrap_or_default(),
        })
    }
}

#[async_trait]
impl Geocoder for OpenWeatherGeocoder {
    #[instrument(skip(self))]
    async fn lookup(&self, query: &str) -> FetchResult<Location> {
        let url = format!(
            "{}/direct?q={}&limit=1&appid={}",
            self.geo_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key)
        );

        let entries: Vec<GeocodingEntry> = fetch_json(&self.client, &url).await?;
        let entry = entries.into_iter().next().ok_or(FetchFailure::Empty)?;
        debug!("Found location: {} ({:.4}, {:.4})", entry.name, entry.lat, entry.lon);

        Ok(entry.into_location(query))
    }

    fn name(&self) -> &'static str {
        "openweather"
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

/// OpenStreetMap Nominatim search
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(config: &WeatherConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(config.timeout_seconds)?,
            base_url: config.nominatim_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn lookup(&self, query: &str) -> FetchResult<Location> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );

        let places: Vec<NominatimPlace> = fetch_json(&self.client, &url).await?;
        let place = places.into_iter().next().ok_or(FetchFailure::Empty)?;

        let latitude = place
            .lat
            .parse::<f64>()
            .map_err(|e| FetchFailure::Malformed(format!("latitude {}: {}", place.lat, e)))?;
        let longitude = place
            .lon
            .parse::<f64>()
            .map_err(|e| FetchFailure::Malformed(format!("longitude {}: {}", place.lon, e)))?;

        debug!("Found location: {} ({:.4}, {:.4})", place.display_name, latitude, longitude);
        Ok(Location::new(latitude, longitude, place.display_name))
    }

    fn name(&self) -> &'static str {
        "nominatim"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> WeatherConfig {
        WeatherConfig {
            api_key: Some("test-key".to_string()),
            geo_url: server.uri(),
            nominatim_url: server.uri(),
            timeout_seconds: 2,
            ..WeatherConfig::default()
        }
    }

    #[tokio::test]
    async fn test_openweather_lookup_labels_name_and_country() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/direct"))
            .and(query_param("q", "Paris"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "Paris", "lat": 48.8589, "lon": 2.32, "country": "FR"}
            ])))
            .mount(&server)
            .await;

        let geocoder = OpenWeatherGeocoder::new(&config_for(&server)).unwrap();
        let location = geocoder.lookup("Paris").await.unwrap();

        assert_eq!(location.name, "Paris, FR");
        assert_eq!(location.country.as_deref(), Some("FR"));
    }

    #[tokio::test]
    async fn test_openweather_lookup_without_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let geocoder = OpenWeatherGeocoder::new(&config_for(&server)).unwrap();
        assert_eq!(geocoder.lookup("Atlantis").await, Err(FetchFailure::Empty));
    }

    #[tokio::test]
    async fn test_nominatim_lookup_parses_string_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("format", "json"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"lat": "59.9133", "lon": "10.7389", "display_name": "Oslo, Norway"}
            ])))
            .mount(&server)
            .await;

        let geocoder = NominatimGeocoder::new(&config_for(&server)).unwrap();
        let location = geocoder.lookup("Oslo").await.unwrap();

        assert_eq!(location.name, "Oslo, Norway");
        assert!((location.latitude - 59.9133).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_nominatim_bad_coordinate_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"lat": "north", "lon": "10.7", "display_name": "Nowhere"}
            ])))
            .mount(&server)
            .await;

        let geocoder = NominatimGeocoder::new(&config_for(&server)).unwrap();
        assert!(matches!(
            geocoder.lookup("Nowhere").await,
            Err(FetchFailure::Malformed(_))
        ));
    }
}

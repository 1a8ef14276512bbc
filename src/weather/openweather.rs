//! OpenWeather API response structures and conversion utilities

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Deserialize;

use crate::error::{FetchFailure, FetchResult};
use crate::models::{AirQuality, CurrentConditions, ForecastSample, Location};

/// Visibility assumed when the provider omits it
pub const DEFAULT_VISIBILITY_M: u32 = 10_000;

#[derive(Debug, Deserialize)]
pub struct WeatherDescriptor {
    pub main: String,
    #[serde(default)]
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct MainBlock {
    pub temp: f64,
    pub feels_like: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    #[serde(default)]
    pub pressure: f64,
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub struct WindBlock {
    #[serde(default)]
    pub speed: f64,
    pub deg: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct CloudsBlock {
    pub all: u8,
}

#[derive(Debug, Deserialize)]
pub struct SysBlock {
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

/// `GET /weather`
#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub weather: Vec<WeatherDescriptor>,
    pub main: MainBlock,
    pub wind: Option<WindBlock>,
    pub clouds: Option<CloudsBlock>,
    pub visibility: Option<u32>,
    pub sys: Option<SysBlock>,
    #[serde(default)]
    pub name: String,
    /// Shift in seconds from UTC
    pub timezone: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastMain {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub struct ForecastItem {
    pub dt: i64,
    pub main: ForecastMain,
    pub weather: Vec<WeatherDescriptor>,
    pub wind: Option<WindBlock>,
    pub pop: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct CityBlock {
    pub timezone: Option<i32>,
}

/// `GET /forecast`
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastItem>,
    pub city: Option<CityBlock>,
}

#[derive(Debug, Deserialize)]
pub struct AqiBlock {
    pub aqi: u8,
}

#[derive(Debug, Deserialize)]
pub struct AirPollutionItem {
    pub main: AqiBlock,
}

/// `GET /air_pollution`
#[derive(Debug, Deserialize)]
pub struct AirPollutionResponse {
    #[serde(default)]
    pub list: Vec<AirPollutionItem>,
}

/// One entry of `GET /geo/1.0/direct`
#[derive(Debug, Deserialize)]
pub struct GeocodingEntry {
    #[serde(default)]
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: Option<String>,
    pub state: Option<String>,
}

impl GeocodingEntry {
    /// Convert to a location, labelled "name, country" or with the query when either is missing
    #[must_use]
    pub fn into_location(self, query: &str) -> Location {
        match self.country.filter(|c| !c.is_empty()) {
            Some(country) if !self.name.is_empty() => Location::with_country(
                self.lat,
                self.lon,
                format!("{}, {}", self.name, country),
                country,
            ),
            Some(country) => {
                Location::with_country(self.lat, self.lon, query.to_string(), country)
            }
            None => Location::new(self.lat, self.lon, query.to_string()),
        }
    }
}

fn offset_from_seconds(seconds: Option<i32>) -> FixedOffset {
    seconds
        .and_then(FixedOffset::east_opt)
        .unwrap_or(Utc.fix())
}

impl TryFrom<CurrentWeatherResponse> for CurrentConditions {
    type Error = FetchFailure;

    fn try_from(response: CurrentWeatherResponse) -> FetchResult<Self> {
        let weather = response
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| FetchFailure::Malformed("current weather without a weather entry".into()))?;

        let main = response.main;
        let sys = response.sys;

        Ok(Self {
            place_name: response.name,
            temperature: main.temp,
            feels_like: main.feels_like.unwrap_or(main.temp),
            temp_min: main.temp_min.unwrap_or(main.temp),
            temp_max: main.temp_max.unwrap_or(main.temp),
            humidity: main.humidity,
            pressure: main.pressure,
            description: weather.description,
            weather_main: weather.main,
            icon: weather.icon,
            wind_speed: response.wind.as_ref().map_or(0.0, |w| w.speed),
            wind_deg: response.wind.as_ref().and_then(|w| w.deg).unwrap_or(0),
            visibility_m: response.visibility.unwrap_or(DEFAULT_VISIBILITY_M),
            cloudiness: response.clouds.map(|c| c.all),
            sunrise: sys
                .as_ref()
                .and_then(|s| s.sunrise)
                .and_then(|t| DateTime::from_timestamp(t, 0)),
            sunset: sys
                .as_ref()
                .and_then(|s| s.sunset)
                .and_then(|t| DateTime::from_timestamp(t, 0)),
            utc_offset_seconds: offset_from_seconds(response.timezone).local_minus_utc(),
        })
    }
}

impl ForecastResponse {
    /// Convert the raw list into samples stamped with the forecast city's local offset
    pub fn into_samples(self) -> FetchResult<Vec<ForecastSample>> {
        let offset = offset_from_seconds(self.city.and_then(|c| c.timezone));

        self.list
            .into_iter()
            .map(|item| {
                let timestamp = DateTime::from_timestamp(item.dt, 0)
                    .ok_or_else(|| FetchFailure::Malformed(format!("invalid timestamp {}", item.dt)))?
                    .with_timezone(&offset);
                let weather = item.weather.into_iter().next().ok_or_else(|| {
                    FetchFailure::Malformed(format!("forecast item {} without a weather entry", item.dt))
                })?;

                Ok(ForecastSample {
                    timestamp,
                    temperature: item.main.temp,
                    weather_main: weather.main,
                    weather_icon: weather.icon,
                    humidity: item.main.humidity,
                    wind_speed: item.wind.map_or(0.0, |w| w.speed),
                    probability_of_precipitation: item.pop,
                })
            })
            .collect()
    }
}

impl AirPollutionResponse {
    /// First reading of the list
    pub fn into_air_quality(self) -> FetchResult<AirQuality> {
        self.list
            .into_iter()
            .next()
            .map(|item| AirQuality { aqi: item.main.aqi })
            .ok_or(FetchFailure::Empty)
    }
}

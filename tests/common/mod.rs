//! Shared fixtures: a mock OpenWeather/Nominatim backend and a dashboard wired to it

#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, TimeZone};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skycast::{Dashboard, SkycastConfig};

/// 2026-03-01T00:00:00Z
pub const FIRST_SAMPLE_EPOCH: i64 = 1_772_323_200;

pub fn config_for(server: &MockServer) -> SkycastConfig {
    let mut config = SkycastConfig::default();
    config.weather.api_key = Some("test-key".to_string());
    config.weather.base_url = server.uri();
    config.weather.geo_url = server.uri();
    config.weather.nominatim_url = server.uri();
    config.weather.timeout_seconds = 2;
    config
}

pub fn dashboard_for(server: &MockServer) -> Dashboard {
    Dashboard::from_config(&config_for(server)).unwrap()
}

pub fn now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2026, 3, 1, 0, 30, 0)
        .unwrap()
}

pub fn current_weather_body(name: &str) -> Value {
    json!({
        "weather": [{"main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {"temp": 18.44, "feels_like": 17.9, "temp_min": 16.0, "temp_max": 20.1,
                 "pressure": 1018, "humidity": 55},
        "wind": {"speed": 3.6, "deg": 200},
        "clouds": {"all": 5},
        "visibility": 10000,
        "sys": {"sunrise": 1_772_346_000, "sunset": 1_772_387_400},
        "name": name,
        "timezone": 0
    })
}

/// 40 samples at 3-hour spacing from 2026-03-01 00:00 UTC: five days of eight
pub fn forecast_body() -> Value {
    let list: Vec<Value> = (0..40)
        .map(|i: i64| {
            let (main, icon) = if i % 8 < 5 { ("Clouds", "04d") } else { ("Rain", "10d") };
            json!({
                "dt": FIRST_SAMPLE_EPOCH + i * 10_800,
                "main": {"temp": 10.0 + (i % 8) as f64, "humidity": 70},
                "weather": [{"main": main, "description": main.to_lowercase(), "icon": icon}],
                "wind": {"speed": 4.26},
                "pop": (i % 8) as f64 / 10.0
            })
        })
        .collect();
    json!({"list": list, "city": {"timezone": 0}})
}

pub async fn mount_geocoding(server: &MockServer, name: &str, country: &str) {
    Mock::given(method("GET"))
        .and(path("/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": name, "lat": 48.8589, "lon": 2.32, "country": country}
        ])))
        .mount(server)
        .await;
}

pub async fn mount_weather(server: &MockServer, name: &str) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_body(name)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/air_pollution"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"list": [{"main": {"aqi": 2}}]})),
        )
        .mount(server)
        .await;
}

/// Every endpoint answers 500
pub async fn mount_outage(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}

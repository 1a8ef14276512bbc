//! Forecast models: raw provider samples and the entries derived from them

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// One raw 3-hour record from the forecast provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastSample {
    /// Sample time, expressed in the forecast location's local offset
    pub timestamp: DateTime<FixedOffset>,
    pub temperature: f64,
    /// Weather category, e.g. "Clouds"
    pub weather_main: String,
    /// Provider icon code, e.g. "04n"
    pub weather_icon: String,
    /// Relative humidity percentage
    pub humidity: u8,
    pub wind_speed: f64,
    /// Probability of precipitation in 0.0..=1.0, when reported
    pub probability_of_precipitation: Option<f64>,
}

/// One card of the short-range forecast strip
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HourlyEntry {
    /// 12-hour clock label without leading zero, e.g. "9 PM"
    pub display_hour: String,
    pub temperature_rounded: i32,
    pub weather_icon: String,
    pub weather_main: String,
    pub humidity: u8,
    /// Wind speed rounded to one decimal place
    pub wind_speed_rounded: f64,
}

/// Per-day summary of all samples sharing a calendar date
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyEntry {
    pub date: NaiveDate,
    /// Three-letter weekday, e.g. "Mon"
    pub day_of_week: String,
    pub temperature_avg_rounded: i32,
    pub temperature_max_rounded: i32,
    pub temperature_min_rounded: i32,
    /// Most frequent weather category of the day
    pub dominant_weather_main: String,
    /// Most frequent icon code of the day, chosen independently of the category
    pub dominant_icon: String,
    /// Highest probability of precipitation over the day, 0..=100
    pub precipitation_max_percent: u8,
}

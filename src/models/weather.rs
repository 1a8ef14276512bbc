//! Current weather conditions

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions at a location, as reported by the provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Place name reported by the provider
    pub place_name: String,
    /// Temperature in the requested unit
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Relative humidity percentage
    pub humidity: u8,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    /// Lower-case description, e.g. "overcast clouds"
    pub description: String,
    /// Weather category, e.g. "Clouds"
    pub weather_main: String,
    /// Provider icon code, e.g. "04d"
    pub icon: String,
    /// Wind speed in the requested unit
    pub wind_speed: f64,
    /// Wind direction in degrees (0 when not reported)
    pub wind_deg: u16,
    /// Visibility in metres (10000 when not reported)
    pub visibility_m: u32,
    /// Cloud cover percentage
    pub cloudiness: Option<u8>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    /// Offset of the location's local time from UTC
    pub utc_offset_seconds: i32,
}

impl CurrentConditions {
    /// Convert wind direction from degrees to cardinal direction
    #[must_use]
    pub fn wind_direction_to_cardinal(degrees: u16) -> &'static str {
        match degrees {
            0..=11 | 349..=360 => "N",
            12..=33 => "NNE",
            34..=56 => "NE",
            57..=78 => "ENE",
            79..=101 => "E",
            102..=123 => "ESE",
            124..=146 => "SE",
            147..=168 => "SSE",
            169..=191 => "S",
            192..=213 => "SSW",
            214..=236 => "SW",
            237..=258 => "WSW",
            259..=281 => "W",
            282..=303 => "WNW",
            304..=326 => "NW",
            327..=348 => "NNW",
            _ => "Unknown",
        }
    }

    /// Visibility in kilometres
    #[must_use]
    pub fn visibility_km(&self) -> f64 {
        f64::from(self.visibility_m) / 1000.0
    }

    /// Offset of the location's local clock
    #[must_use]
    pub fn local_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_seconds).unwrap_or(Utc.fix())
    }

    /// Sunrise and sunset as local `HH:MM` strings
    #[must_use]
    pub fn format_sun_times(&self) -> Option<(String, String)> {
        let offset = self.local_offset();
        let sunrise = self.sunrise?.with_timezone(&offset);
        let sunset = self.sunset?.with_timezone(&offset);
        Some((
            sunrise.format("%H:%M").to_string(),
            sunset.format("%H:%M").to_string(),
        ))
    }

    /// Description with each word capitalised ("overcast clouds" -> "Overcast Clouds")
    #[must_use]
    pub fn title_description(&self) -> String {
        self.description
            .split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn conditions() -> CurrentConditions {
        CurrentConditions {
            place_name: "Mumbai".to_string(),
            temperature: 26.99,
            feels_like: 27.0,
            temp_min: 26.94,
            temp_max: 26.99,
            humidity: 89,
            pressure: 1001.0,
            description: "overcast clouds".to_string(),
            weather_main: "Clouds".to_string(),
            icon: "04d".to_string(),
            wind_speed: 4.63,
            wind_deg: 230,
            visibility_m: 800,
            cloudiness: Some(100),
            sunrise: Utc.with_ymd_and_hms(2026, 3, 1, 1, 0, 0).single(),
            sunset: Utc.with_ymd_and_hms(2026, 3, 1, 13, 0, 0).single(),
            utc_offset_seconds: 19800,
        }
    }

    #[test]
    fn test_wind_direction_to_cardinal() {
        assert_eq!(CurrentConditions::wind_direction_to_cardinal(0), "N");
        assert_eq!(CurrentConditions::wind_direction_to_cardinal(90), "E");
        assert_eq!(CurrentConditions::wind_direction_to_cardinal(180), "S");
        assert_eq!(CurrentConditions::wind_direction_to_cardinal(230), "SW");
        assert_eq!(CurrentConditions::wind_direction_to_cardinal(270), "W");
    }

    #[test]
    fn test_sun_times_use_location_offset() {
        let (sunrise, sunset) = conditions().format_sun_times().unwrap();
        assert_eq!(sunrise, "06:30");
        assert_eq!(sunset, "18:30");
    }

    #[test]
    fn test_title_description() {
        assert_eq!(conditions().title_description(), "Overcast Clouds");
    }

    #[test]
    fn test_visibility_km() {
        assert!((conditions().visibility_km() - 0.8).abs() < f64::EPSILON);
    }
}

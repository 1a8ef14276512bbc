//! Air quality index and its display levels

use serde::{Deserialize, Serialize};

/// Air quality reading on the provider's 1 (good) to 5 (very poor) scale
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct AirQuality {
    pub aqi: u8,
}

/// Display metadata for one AQI value
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum AqiLevel {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

impl AirQuality {
    /// Level for this reading; values outside 1..=5 display as moderate
    #[must_use]
    pub fn level(&self) -> AqiLevel {
        match self.aqi {
            1 => AqiLevel::Good,
            2 => AqiLevel::Fair,
            4 => AqiLevel::Poor,
            5 => AqiLevel::VeryPoor,
            _ => AqiLevel::Moderate,
        }
    }

    /// Width of the AQI gauge, 0..=100
    #[must_use]
    pub fn gauge_percent(&self) -> f64 {
        (f64::from(self.aqi) / 5.0 * 100.0).clamp(0.0, 100.0)
    }

    /// Outdoor-activity advice for this reading
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self.aqi {
            0..=2 => "Good for outdoor activities - Air quality poses little or no risk.",
            3 => {
                "Sensitive groups should limit outdoor exposure - Children and people with respiratory issues may experience symptoms."
            }
            _ => "Limit outdoor activities - Everyone may begin to experience health effects.",
        }
    }
}

impl AqiLevel {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            AqiLevel::Good => "Good",
            AqiLevel::Fair => "Fair",
            AqiLevel::Moderate => "Moderate",
            AqiLevel::Poor => "Poor",
            AqiLevel::VeryPoor => "Very Poor",
        }
    }

    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            AqiLevel::Good => "#34a853",
            AqiLevel::Fair => "#fbbc04",
            AqiLevel::Moderate => "#ff9900",
            AqiLevel::Poor => "#ea4335",
            AqiLevel::VeryPoor => "#a50e0e",
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            AqiLevel::Good => "Air quality is satisfactory",
            AqiLevel::Fair => "Acceptable air quality",
            AqiLevel::Moderate => "Sensitive groups affected",
            AqiLevel::Poor => "Unhealthy for everyone",
            AqiLevel::VeryPoor => "Health alert - Limit outdoor activities",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        assert_eq!(AirQuality { aqi: 1 }.level(), AqiLevel::Good);
        assert_eq!(AirQuality { aqi: 2 }.level(), AqiLevel::Fair);
        assert_eq!(AirQuality { aqi: 3 }.level(), AqiLevel::Moderate);
        assert_eq!(AirQuality { aqi: 5 }.level().label(), "Very Poor");
    }

    #[test]
    fn test_unknown_index_displays_as_moderate() {
        assert_eq!(AirQuality { aqi: 9 }.level(), AqiLevel::Moderate);
        assert_eq!(AirQuality { aqi: 0 }.level(), AqiLevel::Moderate);
    }

    #[test]
    fn test_gauge_and_advice() {
        let reading = AirQuality { aqi: 4 };
        assert!((reading.gauge_percent() - 80.0).abs() < 1e-9);
        assert!(reading.advice().starts_with("Limit outdoor activities"));
        assert!(AirQuality { aqi: 2 }.advice().starts_with("Good for outdoor"));
    }
}

//! Pure rendering of dashboard state into a view model

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::VERSION;
use crate::models::{AqiLevel, CurrentConditions, DailyEntry, HourlyEntry};
use crate::weather::Units;

use super::state::{AppState, Preferences, Theme, WeatherSnapshot};

pub const APP_NAME: &str = "Skycast";
pub const LOAD_ERROR: &str = "Weather data could not be loaded. Please try again.";
pub const AQI_UNAVAILABLE: &str = "Air quality data not available for this location";
pub const MAP_ZOOM: u8 = 11;
pub const MAP_RADIUS_M: u32 = 1000;
/// Recent searches listed in the sidebar
pub const SIDEBAR_RECENT: usize = 5;
/// Fewest hourly points worth charting
pub const CHART_MIN_POINTS: usize = 3;
/// Quick picks; choosing one is an ordinary `Event::Search`
pub const POPULAR_CITIES: [&str; 8] = [
    "Karachi", "Lahore", "Islamabad", "Mumbai", "Delhi", "Dubai", "London", "New York",
];

fn icon_url(icon: &str, scale: u8) -> String {
    format!("https://openweathermap.org/img/wn/{icon}@{scale}x.png")
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Header {
    pub app_name: String,
    pub version: String,
    /// Wall clock, `%I:%M %p`
    pub clock: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CurrentCard {
    pub address: String,
    pub temperature: String,
    pub description: String,
    pub icon_url: String,
    pub wind: String,
    pub wind_direction: String,
    pub humidity: String,
    pub high: String,
    pub low: String,
    pub visibility: String,
    pub pressure: String,
    /// Sunrise and sunset, local `HH:MM`
    pub sun: Option<(String, String)>,
    /// Showing the built-in sample instead of live data
    pub degraded: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct HourlyCard {
    #[serde(flatten)]
    pub entry: HourlyEntry,
    pub icon_url: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DailyRow {
    /// "Today", "Tomorrow", or the weekday
    pub label: String,
    #[serde(flatten)]
    pub entry: DailyEntry,
    pub icon_url: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChartPoint {
    pub hour: String,
    pub temperature: i32,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AirQualityPanel {
    Reading {
        aqi: u8,
        level: AqiLevel,
        label: String,
        color: String,
        description: String,
        gauge_percent: f64,
        advice: String,
    },
    Unavailable {
        message: String,
    },
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
    pub zoom: u8,
    pub radius_m: u32,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Sidebar {
    /// Newest first
    pub recent_searches: Vec<String>,
    pub favorites: Vec<String>,
    pub preferences: Preferences,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Footer {
    pub app_name: String,
    pub version: String,
    /// `%I:%M %p` of the last successful load, or "Never"
    pub last_updated: String,
    pub location: String,
}

/// Everything a frontend needs to draw one frame
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DashboardView {
    pub header: Header,
    pub theme: Theme,
    pub units: Units,
    pub error: Option<String>,
    pub current: Option<CurrentCard>,
    pub hourly: Vec<HourlyCard>,
    pub daily: Vec<DailyRow>,
    pub chart: Option<Vec<ChartPoint>>,
    pub air_quality: Option<AirQualityPanel>,
    pub map: Option<MapMarker>,
    /// `None` while the sidebar is collapsed
    pub sidebar: Option<Sidebar>,
    pub share_text: Option<String>,
    pub popular_cities: Vec<String>,
    pub footer: Footer,
}

/// Render the state as of `now`
#[must_use]
pub fn render(state: &AppState, now: DateTime<FixedOffset>) -> DashboardView {
    let units = state.preferences.units;
    let address = state.location.address.clone();

    let mut view = DashboardView {
        header: Header {
            app_name: APP_NAME.to_string(),
            version: VERSION.to_string(),
            clock: now.format("%I:%M %p").to_string(),
        },
        theme: state.preferences.theme,
        units,
        error: None,
        current: None,
        hourly: Vec::new(),
        daily: Vec::new(),
        chart: None,
        air_quality: None,
        map: None,
        sidebar: state.sidebar_visible.then(|| render_sidebar(state)),
        share_text: None,
        popular_cities: POPULAR_CITIES.iter().map(ToString::to_string).collect(),
        footer: Footer {
            app_name: APP_NAME.to_string(),
            version: VERSION.to_string(),
            last_updated: state
                .last_update
                .map_or_else(|| "Never".to_string(), |t| t.format("%I:%M %p").to_string()),
            location: address.clone(),
        },
    };

    let Some(snapshot) = &state.snapshot else {
        view.error = Some(LOAD_ERROR.to_string());
        return view;
    };

    view.current = Some(render_current(&snapshot.current, &address, units, snapshot.degraded));
    view.hourly = snapshot
        .hourly
        .iter()
        .map(|entry| HourlyCard {
            entry: entry.clone(),
            icon_url: icon_url(&entry.weather_icon, 2),
        })
        .collect();
    view.daily = render_daily(&snapshot.daily);
    view.chart = (state.preferences.show_charts && snapshot.hourly.len() >= CHART_MIN_POINTS)
        .then(|| render_chart(snapshot));
    view.air_quality = Some(render_air_quality(snapshot));
    view.map = state.preferences.show_maps.then(|| MapMarker {
        latitude: state.location.latitude,
        longitude: state.location.longitude,
        label: address.clone(),
        zoom: MAP_ZOOM,
        radius_m: MAP_RADIUS_M,
    });
    view.share_text = Some(format!(
        "🌤️ Weather in {}: {:.1}{}, {}",
        address,
        snapshot.current.temperature,
        units.temperature_suffix(),
        snapshot.current.description
    ));

    view
}

fn render_current(
    current: &CurrentConditions,
    address: &str,
    units: Units,
    degraded: bool,
) -> CurrentCard {
    let degrees = units.temperature_suffix();

    CurrentCard {
        address: address.to_string(),
        temperature: format!("{:.1}{}", current.temperature, degrees),
        description: current.title_description(),
        icon_url: icon_url(&current.icon, 4),
        wind: format!("{:.1} {}", current.wind_speed, units.speed_suffix()),
        wind_direction: format!(
            "{}° {}",
            current.wind_deg,
            CurrentConditions::wind_direction_to_cardinal(current.wind_deg)
        ),
        humidity: format!("{}%", current.humidity),
        high: format!("{:.1}{}", current.temp_max, degrees),
        low: format!("{:.1}{}", current.temp_min, degrees),
        visibility: format!("{:.1} km", current.visibility_km()),
        pressure: format!("{:.0} hPa", current.pressure),
        sun: current.format_sun_times(),
        degraded,
    }
}

fn render_daily(daily: &[DailyEntry]) -> Vec<DailyRow> {
    daily
        .iter()
        .enumerate()
        .map(|(idx, entry)| DailyRow {
            label: match idx {
                0 => "Today".to_string(),
                1 => "Tomorrow".to_string(),
                _ => entry.day_of_week.clone(),
            },
            entry: entry.clone(),
            icon_url: icon_url(&entry.dominant_icon, 2),
        })
        .collect()
}

fn render_chart(snapshot: &WeatherSnapshot) -> Vec<ChartPoint> {
    snapshot
        .hourly
        .iter()
        .map(|entry| ChartPoint {
            hour: entry.display_hour.clone(),
            temperature: entry.temperature_rounded,
        })
        .collect()
}

fn render_air_quality(snapshot: &WeatherSnapshot) -> AirQualityPanel {
    match snapshot.air_quality {
        Some(reading) => {
            let level = reading.level();
            AirQualityPanel::Reading {
                aqi: reading.aqi,
                level,
                label: level.label().to_string(),
                color: level.color().to_string(),
                description: level.description().to_string(),
                gauge_percent: reading.gauge_percent(),
                advice: reading.advice().to_string(),
            }
        }
        None => AirQualityPanel::Unavailable {
            message: AQI_UNAVAILABLE.to_string(),
        },
    }
}

fn render_sidebar(state: &AppState) -> Sidebar {
    Sidebar {
        recent_searches: state
            .search_history
            .iter()
            .rev()
            .take(SIDEBAR_RECENT)
            .cloned()
            .collect(),
        favorites: state.favorites.clone(),
        preferences: state.preferences.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::{derive_daily_at, derive_hourly_at};
    use crate::dashboard::state::{Action, reduce};
    use crate::models::{AirQuality, Location};
    use crate::weather::sample_current_conditions;
    use chrono::TimeZone;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(19800)
            .unwrap()
            .with_ymd_and_hms(2026, 3, 1, 14, 5, 0)
            .unwrap()
    }

    fn loaded_state(air_quality: Option<AirQuality>) -> AppState {
        let state = AppState::new(&Location::new(19.076, 72.8777, "Mumbai, India".to_string()), 10);
        let snapshot = WeatherSnapshot {
            current: sample_current_conditions(now()),
            degraded: false,
            hourly: derive_hourly_at(None, now()),
            daily: derive_daily_at(None, now()),
            air_quality,
            fetched_at: now(),
        };
        reduce(state, Action::SnapshotLoaded(snapshot))
    }

    #[test]
    fn test_no_snapshot_shows_error_banner() {
        let state = AppState::new(&Location::new(1.0, 2.0, "Somewhere".to_string()), 10);
        let view = render(&state, now());

        assert_eq!(view.error.as_deref(), Some(LOAD_ERROR));
        assert!(view.current.is_none());
        assert!(view.map.is_none());
        assert_eq!(view.footer.last_updated, "Never");
        assert_eq!(view.header.clock, "02:05 PM");
    }

    #[test]
    fn test_current_card_formatting() {
        let view = render(&loaded_state(None), now());
        let current = view.current.unwrap();

        assert_eq!(current.temperature, "27.0°C");
        assert_eq!(current.description, "Overcast Clouds");
        assert_eq!(current.icon_url, "https://openweathermap.org/img/wn/04d@4x.png");
        assert_eq!(current.wind_direction, "230° SW");
        assert_eq!(current.visibility, "0.8 km");
        assert_eq!(current.pressure, "1001 hPa");
        assert_eq!(current.sun, Some(("06:30".to_string(), "18:30".to_string())));
    }

    #[test]
    fn test_daily_rows_relabel_first_two_days() {
        let view = render(&loaded_state(None), now());
        let labels: Vec<_> = view.daily.iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, vec!["Today", "Tomorrow", "Sun", "Mon", "Tue", "Wed", "Thu"]);
    }

    #[test]
    fn test_chart_needs_three_points_and_toggle() {
        let mut state = loaded_state(None);
        assert_eq!(render(&state, now()).chart.map(|c| c.len()), Some(7));

        if let Some(snapshot) = state.snapshot.as_mut() {
            snapshot.hourly.truncate(2);
        }
        assert!(render(&state, now()).chart.is_none());

        let mut state = loaded_state(None);
        state.preferences.show_charts = false;
        assert!(render(&state, now()).chart.is_none());
    }

    #[test]
    fn test_air_quality_panel() {
        let view = render(&loaded_state(None), now());
        assert_eq!(
            view.air_quality,
            Some(AirQualityPanel::Unavailable {
                message: AQI_UNAVAILABLE.to_string()
            })
        );

        let view = render(&loaded_state(Some(AirQuality { aqi: 2 })), now());
        match view.air_quality {
            Some(AirQualityPanel::Reading { label, gauge_percent, .. }) => {
                assert_eq!(label, "Fair");
                assert!((gauge_percent - 40.0).abs() < 1e-9);
            }
            other => panic!("unexpected panel {other:?}"),
        }
    }

    #[test]
    fn test_map_marker() {
        let view = render(&loaded_state(None), now());
        let map = view.map.unwrap();
        assert_eq!(map.zoom, 11);
        assert_eq!(map.radius_m, 1000);
        assert_eq!(map.label, "Mumbai, India");

        let mut state = loaded_state(None);
        state.preferences.show_maps = false;
        assert!(render(&state, now()).map.is_none());
    }

    #[test]
    fn test_sidebar_lists_last_five_searches_newest_first() {
        let mut state = loaded_state(None);
        state.search_history = (1..=7).map(|i| format!("City {i}")).collect();
        let sidebar = render(&state, now()).sidebar.unwrap();
        assert_eq!(
            sidebar.recent_searches,
            vec!["City 7", "City 6", "City 5", "City 4", "City 3"]
        );

        state.sidebar_visible = false;
        assert!(render(&state, now()).sidebar.is_none());
    }

    #[test]
    fn test_popular_cities_offered_with_or_without_data() {
        let empty = AppState::new(&Location::new(1.0, 2.0, "Somewhere".to_string()), 10);
        let view = render(&empty, now());
        assert_eq!(view.popular_cities.len(), 8);
        assert_eq!(view.popular_cities[0], "Karachi");
        assert_eq!(view.popular_cities[7], "New York");

        assert_eq!(render(&loaded_state(None), now()).popular_cities, view.popular_cities);
    }

    #[test]
    fn test_share_text_and_footer() {
        let view = render(&loaded_state(None), now());
        assert_eq!(
            view.share_text.as_deref(),
            Some("🌤️ Weather in Mumbai, India: 27.0°C, overcast clouds")
        );
        assert_eq!(view.footer.last_updated, "02:05 PM");
        assert_eq!(view.footer.location, "Mumbai, India");
    }
}

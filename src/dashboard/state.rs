//! Dashboard session state and the pure reducer that evolves it

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::models::{AirQuality, CurrentConditions, DailyEntry, HourlyEntry, Location};
use crate::weather::Units;

/// Colour scheme of the dashboard
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Auto,
    Light,
    Dark,
    HighContrast,
}

impl Theme {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Auto => "Auto",
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::HighContrast => "High Contrast",
        }
    }
}

/// User-adjustable settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub units: Units,
    pub theme: Theme,
    pub show_charts: bool,
    pub show_maps: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            units: Units::Metric,
            theme: Theme::Auto,
            show_charts: true,
            show_maps: true,
        }
    }
}

/// The location currently shown
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationState {
    /// Raw text the user searched for
    pub query: String,
    /// Resolved display label
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationState {
    #[must_use]
    pub fn from_location(query: &str, location: &Location) -> Self {
        Self {
            query: query.to_string(),
            address: location.name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

/// Everything fetched and derived for the current location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    /// Current conditions are the built-in sample rather than live data
    pub degraded: bool,
    pub hourly: Vec<HourlyEntry>,
    pub daily: Vec<DailyEntry>,
    pub air_quality: Option<AirQuality>,
    pub fetched_at: DateTime<FixedOffset>,
}

/// Full dashboard state; serialisable so it can be inspected or persisted by callers
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppState {
    pub location: LocationState,
    pub preferences: Preferences,
    pub sidebar_visible: bool,
    /// Saved addresses, unique, in insertion order
    pub favorites: Vec<String>,
    /// Recent queries, unique, most recent last
    pub search_history: Vec<String>,
    pub history_limit: usize,
    pub snapshot: Option<WeatherSnapshot>,
    pub last_update: Option<DateTime<FixedOffset>>,
}

impl AppState {
    /// Initial state centred on `default`
    #[must_use]
    pub fn new(default: &Location, history_limit: usize) -> Self {
        Self {
            location: LocationState::from_location(&default.name, default),
            preferences: Preferences::default(),
            sidebar_visible: true,
            favorites: Vec::new(),
            search_history: Vec::new(),
            history_limit,
            snapshot: None,
            last_update: None,
        }
    }
}

/// State transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A search resolved; records the query and drops the old snapshot
    LocationResolved { query: String, location: Location },
    SnapshotLoaded(WeatherSnapshot),
    /// New preferences; the snapshot is dropped so the next render refetches
    SettingsSaved(Preferences),
    SidebarToggled(bool),
    /// Save the current address
    FavoriteAdded,
    FavoriteRemoved(String),
    RefreshRequested,
}

/// Apply one action to the state
#[must_use]
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::LocationResolved { query, location } => {
            state.location = LocationState::from_location(&query, &location);
            state.snapshot = None;
            record_search(&mut state, query);
        }
        Action::SnapshotLoaded(snapshot) => {
            state.last_update = Some(snapshot.fetched_at);
            state.snapshot = Some(snapshot);
        }
        Action::SettingsSaved(preferences) => {
            state.preferences = preferences;
            state.snapshot = None;
        }
        Action::SidebarToggled(visible) => state.sidebar_visible = visible,
        Action::FavoriteAdded => {
            let address = state.location.address.clone();
            if !address.is_empty() && !state.favorites.contains(&address) {
                state.favorites.push(address);
            }
        }
        Action::FavoriteRemoved(name) => state.favorites.retain(|f| f != &name),
        Action::RefreshRequested => state.snapshot = None,
    }
    state
}

// Existing entries keep their position
fn record_search(state: &mut AppState, query: String) {
    if query.is_empty() || state.search_history.contains(&query) {
        return;
    }
    state.search_history.push(query);
    while state.search_history.len() > state.history_limit {
        state.search_history.remove(0);
    }
}

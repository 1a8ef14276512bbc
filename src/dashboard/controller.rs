//! Event dispatcher tying the clients, aggregator, reducer and renderer together

use chrono::{DateTime, FixedOffset, Local};
use tracing::{info, instrument, warn};

use crate::aggregation::{derive_daily_at, derive_hourly_at};
use crate::config::SkycastConfig;
use crate::location_resolver::LocationResolver;
use crate::weather::{WeatherClient, sample_current_conditions};

use super::state::{Action, AppState, Preferences, WeatherSnapshot, reduce};
use super::view::{DashboardView, render};

/// User interactions
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Search(String),
    UseDefaultLocation,
    Refresh,
    SaveSettings(Preferences),
    AddFavorite,
    RemoveFavorite(String),
    SetSidebar(bool),
    /// Render only; loads data if nothing is loaded yet
    Show,
}

/// Owns the session state and runs one interaction at a time
pub struct Dashboard {
    weather: WeatherClient,
    resolver: LocationResolver,
    state: AppState,
}

impl Dashboard {
    pub fn new(weather: WeatherClient, resolver: LocationResolver, history_limit: usize) -> Self {
        let state = AppState::new(resolver.default_location(), history_limit);
        Self {
            weather,
            resolver,
            state,
        }
    }

    pub fn from_config(config: &SkycastConfig) -> anyhow::Result<Self> {
        Ok(Self::new(
            WeatherClient::new(&config.weather)?,
            LocationResolver::from_config(config)?,
            config.dashboard.history_limit,
        ))
    }

    /// Replace the preferences without fetching
    #[must_use]
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.apply(Action::SettingsSaved(preferences));
        self
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Handle one event at the current local time
    pub async fn dispatch(&mut self, event: Event) -> DashboardView {
        self.dispatch_at(event, Local::now().fixed_offset()).await
    }

    /// Handle one event; fetches run only when no snapshot is held afterwards
    #[instrument(skip(self, now))]
    pub async fn dispatch_at(&mut self, event: Event, now: DateTime<FixedOffset>) -> DashboardView {
        match event {
            Event::Search(query) => self.search(query).await,
            Event::UseDefaultLocation => {
                let query = self.resolver.default_location().name.clone();
                self.search(query).await;
            }
            Event::Refresh => self.apply(Action::RefreshRequested),
            Event::SaveSettings(preferences) => self.apply(Action::SettingsSaved(preferences)),
            Event::AddFavorite => self.apply(Action::FavoriteAdded),
            Event::RemoveFavorite(name) => self.apply(Action::FavoriteRemoved(name)),
            Event::SetSidebar(visible) => self.apply(Action::SidebarToggled(visible)),
            Event::Show => {}
        }

        if self.state.snapshot.is_none() {
            let snapshot = self.load_snapshot(now).await;
            self.apply(Action::SnapshotLoaded(snapshot));
        }

        render(&self.state, now)
    }

    fn apply(&mut self, action: Action) {
        self.state = reduce(self.state.clone(), action);
    }

    async fn search(&mut self, query: String) {
        let resolution = self.resolver.resolve(&query).await;
        info!(
            "Location '{}' resolved to {} ({:?})",
            query, resolution.location.name, resolution.source
        );
        self.apply(Action::LocationResolved {
            query: query.trim().to_string(),
            location: resolution.location,
        });
    }

    /// Current conditions, forecast, then air quality, each with its own fallback
    async fn load_snapshot(&self, now: DateTime<FixedOffset>) -> WeatherSnapshot {
        let lat = self.state.location.latitude;
        let lon = self.state.location.longitude;
        let units = self.state.preferences.units;

        let (current, degraded) = match self.weather.current_weather(lat, lon, units).await {
            Ok(current) => (current, false),
            Err(e) => {
                warn!("Current weather unavailable ({}), showing sample data", e);
                (sample_current_conditions(now), true)
            }
        };

        let samples = match self.weather.forecast(lat, lon, units).await {
            Ok(samples) => Some(samples),
            Err(e) => {
                warn!("Forecast unavailable ({}), using placeholder entries", e);
                None
            }
        };

        let air_quality = match self.weather.air_quality(lat, lon).await {
            Ok(reading) => Some(reading),
            Err(e) => {
                warn!("Air quality unavailable: {}", e);
                None
            }
        };

        WeatherSnapshot {
            current,
            degraded,
            hourly: derive_hourly_at(samples.as_deref(), now),
            daily: derive_daily_at(samples.as_deref(), now),
            air_quality,
            fetched_at: now,
        }
    }
}

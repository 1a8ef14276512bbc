//! Plain-text rendering of a dashboard view for terminals

use std::fmt::Write;

use super::view::{AirQualityPanel, DashboardView};

/// Render the view as multi-line text
#[must_use]
pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = write_view(&mut out, view);
    out
}

fn write_view(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    writeln!(
        out,
        "{} v{}  {}",
        view.header.app_name, view.header.version, view.header.clock
    )?;
    writeln!(out)?;

    if let Some(error) = &view.error {
        writeln!(out, "⚠️  {error}")?;
        writeln!(out)?;
    }

    if let Some(current) = &view.current {
        writeln!(out, "📍 {}", current.address)?;
        if current.degraded {
            writeln!(out, "   (showing sample data, live conditions unavailable)")?;
        }
        writeln!(out, "   {}  {}", current.temperature, current.description)?;
        writeln!(
            out,
            "   Wind {} {}  Humidity {}",
            current.wind, current.wind_direction, current.humidity
        )?;
        writeln!(
            out,
            "   High {}  Low {}  Visibility {}  Pressure {}",
            current.high, current.low, current.visibility, current.pressure
        )?;
        if let Some((sunrise, sunset)) = &current.sun {
            writeln!(out, "   Sunrise {sunrise}  Sunset {sunset}")?;
        }
        writeln!(out)?;
    }

    if !view.hourly.is_empty() {
        writeln!(out, "Next hours")?;
        for card in &view.hourly {
            writeln!(
                out,
                "  {:>5}  {:>4}°  {:<12} {:>3}%  {:.1} wind",
                card.entry.display_hour,
                card.entry.temperature_rounded,
                card.entry.weather_main,
                card.entry.humidity,
                card.entry.wind_speed_rounded
            )?;
        }
        writeln!(out)?;
    }

    if !view.daily.is_empty() {
        writeln!(out, "7-day forecast")?;
        for row in &view.daily {
            writeln!(
                out,
                "  {:<9} {:>4}° / {:>4}°  avg {:>4}°  {:<12} {:>3}% rain",
                row.label,
                row.entry.temperature_max_rounded,
                row.entry.temperature_min_rounded,
                row.entry.temperature_avg_rounded,
                row.entry.dominant_weather_main,
                row.entry.precipitation_max_percent
            )?;
        }
        writeln!(out)?;
    }

    match &view.air_quality {
        Some(AirQualityPanel::Reading {
            aqi, label, advice, ..
        }) => {
            writeln!(out, "Air quality: AQI {aqi} ({label})")?;
            writeln!(out, "  {advice}")?;
            writeln!(out)?;
        }
        Some(AirQualityPanel::Unavailable { message }) => {
            writeln!(out, "Air quality: {message}")?;
            writeln!(out)?;
        }
        None => {}
    }

    if let Some(map) = &view.map {
        writeln!(out, "🌍 {:.4}, {:.4}", map.latitude, map.longitude)?;
    }
    if let Some(share) = &view.share_text {
        writeln!(out, "{share}")?;
    }
    if !view.popular_cities.is_empty() {
        writeln!(out, "Popular cities: {}", view.popular_cities.join(" · "))?;
    }

    writeln!(
        out,
        "{} v{} • Last updated: {} • Location: {}",
        view.footer.app_name, view.footer.version, view.footer.last_updated, view.footer.location
    )
}

//! Forecast aggregation
//!
//! Turns the provider's 3-hourly forecast list into the short-range strip
//! (first seven samples) and the per-day summaries (first seven calendar
//! dates). Both functions are total: a missing or empty forecast yields a
//! fixed placeholder sequence instead of an error.

use chrono::{DateTime, Days, FixedOffset, Local, NaiveDate, TimeDelta};
use tracing::debug;

use crate::models::{DailyEntry, ForecastSample, HourlyEntry};

/// Number of entries in the short-range strip
pub const HOURLY_ENTRIES: usize = 7;
/// Maximum number of per-day summaries
pub const DAILY_ENTRIES: usize = 7;

const PLACEHOLDER_WEEKDAYS: [&str; DAILY_ENTRIES] = ["Fri", "Sat", "Sun", "Mon", "Tue", "Wed", "Thu"];

/// Short-range strip from the first seven samples.
///
/// Takes samples, not hours: with a 3-hour feed this spans about 21 hours.
#[must_use]
pub fn derive_hourly(samples: Option<&[ForecastSample]>) -> Vec<HourlyEntry> {
    derive_hourly_at(samples, Local::now().fixed_offset())
}

/// [`derive_hourly`] with an explicit clock for the placeholder sequence
#[must_use]
pub fn derive_hourly_at(
    samples: Option<&[ForecastSample]>,
    now: DateTime<FixedOffset>,
) -> Vec<HourlyEntry> {
    let samples = match samples {
        Some(samples) if !samples.is_empty() => samples,
        _ => {
            debug!("No forecast samples, using placeholder hourly sequence");
            return placeholder_hourly(now);
        }
    };

    samples
        .iter()
        .take(HOURLY_ENTRIES)
        .map(|sample| HourlyEntry {
            display_hour: format_hour(&sample.timestamp),
            temperature_rounded: round_to_int(sample.temperature),
            weather_icon: sample.weather_icon.clone(),
            weather_main: sample.weather_main.clone(),
            humidity: sample.humidity,
            wind_speed_rounded: round_to_tenth(sample.wind_speed),
        })
        .collect()
}

/// Per-day summaries, one per distinct local date in first-seen order.
#[must_use]
pub fn derive_daily(samples: Option<&[ForecastSample]>) -> Vec<DailyEntry> {
    derive_daily_at(samples, Local::now().fixed_offset())
}

/// [`derive_daily`] with an explicit clock for the placeholder sequence
#[must_use]
pub fn derive_daily_at(
    samples: Option<&[ForecastSample]>,
    now: DateTime<FixedOffset>,
) -> Vec<DailyEntry> {
    let samples = match samples {
        Some(samples) if !samples.is_empty() => samples,
        _ => {
            debug!("No forecast samples, using placeholder daily sequence");
            return placeholder_daily(now.date_naive());
        }
    };

    let mut days: Vec<(NaiveDate, Vec<&ForecastSample>)> = Vec::new();
    for sample in samples {
        let date = sample.timestamp.date_naive();
        match days.iter_mut().find(|(day, _)| *day == date) {
            Some((_, group)) => group.push(sample),
            None => days.push((date, vec![sample])),
        }
    }

    days.into_iter()
        .take(DAILY_ENTRIES)
        .map(|(date, group)| summarize_day(date, &group))
        .collect()
}

fn summarize_day(date: NaiveDate, group: &[&ForecastSample]) -> DailyEntry {
    let temps: Vec<f64> = group.iter().map(|s| s.temperature).collect();
    let count = temps.len().max(1) as f64;
    let avg = temps.iter().sum::<f64>() / count;
    let max = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = temps.iter().copied().fold(f64::INFINITY, f64::min);

    let precipitation = group
        .iter()
        .map(|s| s.probability_of_precipitation.unwrap_or(0.0) * 100.0)
        .fold(0.0_f64, f64::max);

    DailyEntry {
        date,
        day_of_week: date.format("%a").to_string(),
        temperature_avg_rounded: round_to_int(avg),
        temperature_max_rounded: round_to_int(max),
        temperature_min_rounded: round_to_int(min),
        dominant_weather_main: most_frequent(group.iter().map(|s| s.weather_main.as_str()))
            .unwrap_or_else(|| "Clear".to_string()),
        dominant_icon: most_frequent(group.iter().map(|s| s.weather_icon.as_str()))
            .unwrap_or_else(|| "01d".to_string()),
        precipitation_max_percent: round_to_int(precipitation).clamp(0, 100) as u8,
    }
}

/// Most frequent value; on a tie the value seen first wins.
fn most_frequent<'a>(values: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.to_string())
}

/// "9 PM", "12 AM"
fn format_hour(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format("%-I %p").to_string()
}

// Ties round to even: 26.5 -> 26, 27.5 -> 28
fn round_to_int(value: f64) -> i32 {
    value.round_ties_even() as i32
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

fn placeholder_hourly(now: DateTime<FixedOffset>) -> Vec<HourlyEntry> {
    (0..HOURLY_ENTRIES)
        .map(|i| {
            let at = now + TimeDelta::hours(i as i64);
            let cloudy = i < 4;
            HourlyEntry {
                display_hour: format_hour(&at),
                temperature_rounded: 26 + (i % 2) as i32,
                weather_icon: if cloudy { "04d" } else { "01d" }.to_string(),
                weather_main: if cloudy { "Clouds" } else { "Clear" }.to_string(),
                humidity: (80 - 5 * i) as u8,
                wind_speed_rounded: round_to_tenth(3.5 + i as f64 / 2.0),
            }
        })
        .collect()
}

fn placeholder_daily(today: NaiveDate) -> Vec<DailyEntry> {
    PLACEHOLDER_WEEKDAYS
        .iter()
        .enumerate()
        .map(|(i, weekday)| {
            let overcast = i < 3;
            let offset = (i % 2) as i32;
            DailyEntry {
                date: today.checked_add_days(Days::new(i as u64)).unwrap_or(today),
                day_of_week: (*weekday).to_string(),
                temperature_avg_rounded: 27 + offset,
                temperature_max_rounded: 28 + offset,
                temperature_min_rounded: 26 + offset,
                dominant_weather_main: if overcast { "Overcast Clouds" } else { "Clear" }
                    .to_string(),
                dominant_icon: if overcast { "04d" } else { "01d" }.to_string(),
                precipitation_max_percent: 0,
            }
        })
        .collect()
}

//! Properties of the hourly and daily forecast summaries over realistic feeds

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, TimeZone};
use rstest::{fixture, rstest};

use skycast::aggregation::{derive_daily_at, derive_hourly_at};
use skycast::ForecastSample;

fn start(offset_seconds: i32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(offset_seconds)
        .unwrap()
        .with_ymd_and_hms(2026, 3, 1, 0, 0, 0)
        .unwrap()
}

fn feed(count: usize, offset_seconds: i32) -> Vec<ForecastSample> {
    (0..count)
        .map(|i| ForecastSample {
            timestamp: start(offset_seconds) + TimeDelta::hours(3 * i as i64),
            temperature: 20.0 + ((i * 7) % 11) as f64 * 0.9 - 4.0,
            weather_main: ["Clouds", "Rain", "Clear"][i % 3].to_string(),
            weather_icon: ["04d", "10d", "01d"][(i / 2) % 3].to_string(),
            humidity: (50 + i % 40) as u8,
            wind_speed: 1.0 + i as f64 * 0.37,
            probability_of_precipitation: (i % 4 != 0).then(|| (i % 10) as f64 / 10.0),
        })
        .collect()
}

#[fixture]
fn five_days() -> Vec<ForecastSample> {
    feed(40, 0)
}

#[rstest]
fn test_forty_samples_cover_five_dates(five_days: Vec<ForecastSample>) {
    let daily = derive_daily_at(Some(five_days.as_slice()), start(0));

    assert_eq!(daily.len(), 5);
    let dates: Vec<NaiveDate> = daily.iter().map(|d| d.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
    assert_eq!(daily[0].day_of_week, "Sun");
}

#[rstest]
fn test_daily_aggregates_match_each_date(five_days: Vec<ForecastSample>) {
    let daily = derive_daily_at(Some(five_days.as_slice()), start(0));

    for entry in &daily {
        let day: Vec<&ForecastSample> = five_days
            .iter()
            .filter(|s| s.timestamp.date_naive() == entry.date)
            .collect();
        let temps: Vec<f64> = day.iter().map(|s| s.temperature).collect();
        let mean = temps.iter().sum::<f64>() / temps.len() as f64;
        let max = temps.iter().copied().fold(f64::MIN, f64::max);
        let min = temps.iter().copied().fold(f64::MAX, f64::min);
        let pop = day
            .iter()
            .filter_map(|s| s.probability_of_precipitation)
            .fold(0.0, f64::max);

        assert_eq!(entry.temperature_avg_rounded, mean.round_ties_even() as i32);
        assert_eq!(entry.temperature_max_rounded, max.round_ties_even() as i32);
        assert_eq!(entry.temperature_min_rounded, min.round_ties_even() as i32);
        assert_eq!(
            i32::from(entry.precipitation_max_percent),
            (pop * 100.0).round_ties_even() as i32
        );
    }
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(6)]
#[case(7)]
#[case(40)]
fn test_hourly_length_is_min_of_samples_and_seven(#[case] count: usize) {
    let samples = feed(count, 0);
    let hourly = derive_hourly_at(Some(samples.as_slice()), start(0));

    // An empty feed yields the placeholder strip
    let expected = if count == 0 { 7 } else { count.min(7) };
    assert_eq!(hourly.len(), expected);

    for (entry, sample) in hourly.iter().zip(&samples) {
        assert_eq!(entry.weather_main, sample.weather_main);
        assert_eq!(entry.temperature_rounded, sample.temperature.round_ties_even() as i32);
    }
}

#[rstest]
#[case(8)]
#[case(24)]
#[case(80)]
fn test_daily_never_exceeds_seven_or_distinct_dates(#[case] count: usize) {
    let samples = feed(count, 0);
    let daily = derive_daily_at(Some(samples.as_slice()), start(0));

    let mut dates: Vec<NaiveDate> = samples.iter().map(|s| s.timestamp.date_naive()).collect();
    dates.dedup();
    assert!(daily.len() <= 7);
    assert!(daily.len() <= dates.len());
}

#[rstest]
fn test_single_sample_yields_one_day() {
    let samples = feed(1, 0);
    let daily = derive_daily_at(Some(samples.as_slice()), start(0));

    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].temperature_avg_rounded, daily[0].temperature_max_rounded);
    assert_eq!(daily[0].temperature_min_rounded, daily[0].temperature_max_rounded);
    assert_eq!(daily[0].dominant_weather_main, "Clouds");
    assert_eq!(daily[0].precipitation_max_percent, 0);
}

#[rstest]
fn test_repeated_derivation_is_identical(five_days: Vec<ForecastSample>) {
    let before = five_days.clone();

    let first = (
        derive_hourly_at(Some(five_days.as_slice()), start(0)),
        derive_daily_at(Some(five_days.as_slice()), start(0)),
    );
    let second = (
        derive_hourly_at(Some(five_days.as_slice()), start(0)),
        derive_daily_at(Some(five_days.as_slice()), start(0)),
    );

    assert_eq!(first, second);
    assert_eq!(five_days, before);
}

#[rstest]
#[case(0, "12 AM")]
#[case(19800, "12 AM")]
#[case(-18000, "12 AM")]
fn test_hour_labels_follow_sample_offset(#[case] offset: i32, #[case] first_label: &str) {
    let samples = feed(7, offset);
    let hourly = derive_hourly_at(Some(samples.as_slice()), start(offset));

    let labels: Vec<&str> = hourly.iter().map(|h| h.display_hour.as_str()).collect();
    assert_eq!(labels[0], first_label);
    assert_eq!(labels[1], "3 AM");
    assert_eq!(labels[4], "12 PM");
}

#[rstest]
fn test_dates_are_local_to_the_feed_offset() {
    // 2026-03-01 00:00 at UTC+5:30 is 2026-02-28 18:30 UTC
    let samples = feed(8, 19800);
    let daily = derive_daily_at(Some(samples.as_slice()), start(19800));

    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
}

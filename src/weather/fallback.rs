//! Fixed current-conditions payload shown when the live fetch fails

use chrono::{DateTime, FixedOffset, NaiveTime, Utc};

use crate::models::CurrentConditions;

/// Sample conditions, with sunrise at 06:30 and sunset at 18:30 on `now`'s local date
#[must_use]
pub fn sample_current_conditions(now: DateTime<FixedOffset>) -> CurrentConditions {
    let at_local = |hour: u32, minute: u32| -> Option<DateTime<Utc>> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
        now.date_naive()
            .and_time(time)
            .and_local_timezone(*now.offset())
            .single()
            .map(|local| local.with_timezone(&Utc))
    };

    CurrentConditions {
        place_name: "Mumbai".to_string(),
        temperature: 26.99,
        feels_like: 27.0,
        temp_min: 26.94,
        temp_max: 26.99,
        humidity: 89,
        pressure: 1001.0,
        description: "overcast clouds".to_string(),
        weather_main: "Overcast Clouds".to_string(),
        icon: "04d".to_string(),
        wind_speed: 4.63,
        wind_deg: 230,
        visibility_m: 800,
        cloudiness: Some(100),
        sunrise: at_local(6, 30),
        sunset: at_local(18, 30),
        utc_offset_seconds: now.offset().local_minus_utc(),
    }
}

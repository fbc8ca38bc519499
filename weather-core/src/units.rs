//! Unit conversion and display formatting for weather values.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

const KELVIN_OFFSET: f64 = 273.15;

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Unix seconds to Unix milliseconds, or `None` on overflow.
pub fn to_millis(seconds: i64) -> Option<i64> {
    seconds.checked_mul(1000)
}

pub fn format_temperature(celsius: f64) -> String {
    format!("{celsius:.0}°C")
}

pub fn format_wind_speed(speed: f64) -> String {
    format!("{speed:.1} m/s")
}

/// Sunrise as `hh.mm` (12-hour clock) in the timezone of `tz`.
///
/// Returns `None` when the timestamp is outside the representable range.
pub fn format_sunrise<Tz>(sunrise_seconds: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let millis = to_millis(sunrise_seconds)?;
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|at| at.format("%I.%M").to_string())
}

/// Current time as e.g. `Tuesday, 09:41 AM`.
pub fn format_current_time<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format("%A, %I:%M %p").to_string()
}

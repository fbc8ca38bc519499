use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::fmt::Display;

use crate::{
    icon::{WeatherIcon, map_icon_code},
    model::WeatherObservation,
    units::{
        format_current_time, format_sunrise, format_temperature, format_wind_speed,
        kelvin_to_celsius,
    },
};

/// Display values bound to the landing screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub city: String,
    pub current_time: String,
    pub temperature_celsius: f64,
    pub temperature: String,
    pub sunrise: String,
    pub wind: String,
    pub icon: WeatherIcon,
}

impl WeatherView {
    /// Project an observation into display values.
    ///
    /// `now` is the render-time clock reading; its timezone is also used for
    /// the sunrise time.
    pub fn from_observation<Tz>(observation: &WeatherObservation, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let temperature_celsius = kelvin_to_celsius(observation.temperature_kelvin);

        let sunrise = format_sunrise(observation.sunrise_time, &now.timezone())
            .unwrap_or_else(|| "--.--".to_string());

        Self {
            city: observation.place_name.clone(),
            current_time: format_current_time(now),
            temperature_celsius,
            temperature: format_temperature(temperature_celsius),
            sunrise,
            wind: format_wind_speed(observation.wind_speed),
            icon: map_icon_code(observation.weather_icon.as_deref()),
        }
    }
}

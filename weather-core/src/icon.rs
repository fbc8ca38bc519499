use serde::{Deserialize, Serialize};

/// Icon asset shown for a weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    #[default]
    ClearSky,
    FewClouds,
    ScatteredClouds,
    BrokenClouds,
    ShowerRain,
    Rain,
    Thunderstorm,
    Snow,
    Mist,
}

impl WeatherIcon {
    pub const fn all() -> &'static [WeatherIcon] {
        &[
            WeatherIcon::ClearSky,
            WeatherIcon::FewClouds,
            WeatherIcon::ScatteredClouds,
            WeatherIcon::BrokenClouds,
            WeatherIcon::ShowerRain,
            WeatherIcon::Rain,
            WeatherIcon::Thunderstorm,
            WeatherIcon::Snow,
            WeatherIcon::Mist,
        ]
    }

    /// Stable asset identifier, e.g. `"clear_sky"`.
    pub fn asset_id(&self) -> &'static str {
        match self {
            WeatherIcon::ClearSky => "clear_sky",
            WeatherIcon::FewClouds => "few_clouds",
            WeatherIcon::ScatteredClouds => "scattered_clouds",
            WeatherIcon::BrokenClouds => "broken_clouds",
            WeatherIcon::ShowerRain => "shower_rain",
            WeatherIcon::Rain => "rain",
            WeatherIcon::Thunderstorm => "thunderstorm",
            WeatherIcon::Snow => "snow",
            WeatherIcon::Mist => "mist",
        }
    }

    /// Terminal rendering of the asset.
    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherIcon::ClearSky => "☀",
            WeatherIcon::FewClouds => "🌤",
            WeatherIcon::ScatteredClouds => "⛅",
            WeatherIcon::BrokenClouds => "☁",
            WeatherIcon::ShowerRain => "🌦",
            WeatherIcon::Rain => "🌧",
            WeatherIcon::Thunderstorm => "⛈",
            WeatherIcon::Snow => "❄",
            WeatherIcon::Mist => "🌫",
        }
    }
}

impl std::fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.asset_id())
    }
}

/// Map an OpenWeather condition-code token to its icon.
///
/// Day and night variants share an icon. Unknown or missing tokens fall back
/// to clear sky.
pub fn map_icon_code(token: Option<&str>) -> WeatherIcon {
    match token {
        Some("01d" | "01n") => WeatherIcon::ClearSky,
        Some("02d" | "02n") => WeatherIcon::FewClouds,
        Some("03d" | "03n") => WeatherIcon::ScatteredClouds,
        Some("04d" | "04n") => WeatherIcon::BrokenClouds,
        Some("09d" | "09n") => WeatherIcon::ShowerRain,
        Some("10d" | "10n") => WeatherIcon::Rain,
        Some("11d" | "11n") => WeatherIcon::Thunderstorm,
        Some("13d" | "13n") => WeatherIcon::Snow,
        Some("50d" | "50n") => WeatherIcon::Mist,
        _ => WeatherIcon::ClearSky,
    }
}

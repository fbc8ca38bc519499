use anyhow::Context;
use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, Location, WeatherError, WeatherObservation};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, location: &Location) -> Result<WeatherObservation, WeatherError>;
}

/// Construct the OpenWeather provider from stored credentials.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.usable_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for OpenWeather.\n\
                 Hint: run `minimal-weather configure` and enter your API key."
        )
    })?;

    let provider = match config.provider_base_url() {
        Some(base_url) => OpenWeatherProvider::with_base_url(api_key.to_owned(), base_url),
        None => OpenWeatherProvider::new(api_key.to_owned()),
    }
    .context("Failed to build the OpenWeather HTTP client")?;

    Ok(provider)
}

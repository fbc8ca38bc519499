use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, Password};
use minimal_weather_core::{
    Config, FetchPolicy, LandingScreen, Location, ScreenState, provider_from_config,
};
use std::{sync::Arc, time::Duration};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{host::TerminalHost, render::render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "minimal-weather", version, about = "Current weather for your location")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and an optional default location.
    Configure,

    /// Show current weather for a location.
    Show {
        /// Latitude in degrees; defaults to the configured location.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in degrees; defaults to the configured location.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Report the location again every N seconds until Ctrl-C.
        #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
        refresh: Option<u64>,

        /// Overlapping fetch policy: "last-write-wins" or "cancel-superseded".
        #[arg(long)]
        policy: Option<String>,

        /// Print each screen state as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { lat, lon, refresh, policy, json } => {
                let coordinates = lat.zip(lon).map(|(lat, lon)| Location::new(lat, lon));
                show(coordinates, refresh.map(Duration::from_secs), policy.as_deref(), json).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let set_location = Confirm::new("Set a default location?")
        .with_default(config.location.is_none())
        .prompt()?;

    if set_location {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please type a number, e.g. 48.8566")
            .prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please type a number, e.g. 2.3522")
            .prompt()?;
        config.set_location(Location::new(latitude, longitude));
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(
    coordinates: Option<Location>,
    refresh: Option<Duration>,
    policy: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;

    let location = coordinates.or(config.location).ok_or_else(|| {
        anyhow!(
            "No location given.\n\
             Hint: pass `--lat` and `--lon`, or run `minimal-weather configure` to store a default."
        )
    })?;

    let policy = match policy {
        Some(policy) => FetchPolicy::try_from(policy)?,
        None => config.fetch_policy,
    };

    let weather = Arc::new(provider_from_config(&config)?);
    let host = Arc::new(TerminalHost::new(config, location, refresh));
    let screen = LandingScreen::new(host, weather, policy);

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupted, shutting down");
                cancel.cancel();
            }
        }
    });

    let renderer = tokio::spawn(print_states(screen.state(), json));

    let outcome = screen.run(cancel).await;

    // Closing the state channel lets the renderer flush and stop.
    drop(screen);
    renderer.await.context("Renderer task failed")?;

    if !outcome.allows_updates() {
        bail!(
            "Location access was not granted.\n\
             Hint: run `minimal-weather show` again to be asked once more."
        );
    }

    Ok(())
}

async fn print_states(mut states: watch::Receiver<ScreenState>, json: bool) {
    let mut last: Option<ScreenState> = None;

    loop {
        let current = states.borrow_and_update().clone();

        if last.as_ref() != Some(&current) {
            if json {
                match serde_json::to_string(&current) {
                    Ok(line) => println!("{line}"),
                    Err(err) => tracing::warn!(error = %err, "could not serialize screen state"),
                }
            } else {
                if last.is_some() {
                    println!();
                }
                println!("{}", render(&current));
            }
            last = Some(current);
        }

        if states.changed().await.is_err() {
            break;
        }
    }
}

//! Core library for the `minimal-weather` landing screen.
//!
//! This crate defines:
//! - The location permission gate and the location provider interface
//! - Weather providers and one-shot fetches exposed as resources
//! - The projection from location fixes to formatted weather views
//! - Icon mapping, unit conversion and display formatting
//! - Configuration & credentials handling
//!
//! It is used by `minimal-weather`, but the screen can be driven by any host
//! that implements [`LocationProvider`].

pub mod config;
pub mod error;
pub mod gate;
pub mod icon;
pub mod landing;
pub mod location;
pub mod model;
pub mod projection;
pub mod provider;
pub mod resource;
pub mod units;
pub mod view;

pub use config::{Config, PermissionConfig, ProviderConfig};
pub use error::WeatherError;
pub use gate::{GateOutcome, LocationGate};
pub use icon::{WeatherIcon, map_icon_code};
pub use landing::{LandingScreen, ScreenIssue, ScreenState};
pub use location::{LocationProvider, Permission, PermissionGrant, PermissionResponse};
pub use model::{Location, Resource, Status, WeatherObservation};
pub use projection::{
    FetchFailure, FetchPolicy, ProjectionEvent, ProjectionStreams, WeatherProjection,
};
pub use provider::{OpenWeatherProvider, WeatherProvider, provider_from_config};
pub use view::WeatherView;

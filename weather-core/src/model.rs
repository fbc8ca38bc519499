use serde::{Deserialize, Serialize};

/// A single resolved coordinate reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// Current conditions as reported by a weather provider, in provider units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub place_name: String,
    pub temperature_kelvin: f64,
    pub wind_speed: f64,
    /// Unix seconds.
    pub sunrise_time: i64,
    /// Condition-code token such as `"01d"`; providers may omit it.
    pub weather_icon: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Loading,
    Success,
    Error,
}

/// State of a single asynchronous fetch.
///
/// A resource starts as `Loading` and moves to exactly one of the terminal
/// states.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> Resource<T> {
    pub fn status(&self) -> Status {
        match self {
            Resource::Loading => Status::Loading,
            Resource::Success(_) => Status::Success,
            Resource::Error(_) => Status::Error,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Resource::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Success(data) => Some(data),
            _ => None,
        }
    }
}

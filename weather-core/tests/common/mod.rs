//! Test doubles for the location and weather providers.
#![allow(dead_code)]

use async_trait::async_trait;
use minimal_weather_core::{
    Location, LocationProvider, Permission, PermissionGrant, PermissionResponse, WeatherError,
    WeatherObservation, WeatherProvider,
};
use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

pub type FetchResult = Result<WeatherObservation, WeatherError>;

pub fn observation(place: &str, kelvin: f64, icon: Option<&str>) -> WeatherObservation {
    WeatherObservation {
        place_name: place.to_string(),
        temperature_kelvin: kelvin,
        wind_speed: 5.0,
        sunrise_time: 1_600_000_000,
        weather_icon: icon.map(str::to_string),
    }
}

pub fn upstream_error() -> WeatherError {
    WeatherError::Status {
        provider: "test",
        status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        body: "try later".into(),
    }
}

/// Answers each fetch only when the test releases it.
#[derive(Debug, Default)]
pub struct GatedWeather {
    pending: Mutex<VecDeque<(Location, oneshot::Sender<FetchResult>)>>,
    calls: AtomicUsize,
}

impl GatedWeather {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Wait until at least `n` fetches have been issued.
    pub async fn wait_for_calls(&self, n: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.calls() < n {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("fetches were not issued in time");
    }

    /// Complete the pending fetch for `location`. Returns false if the fetch
    /// was already dropped (e.g. cancelled).
    pub fn release(&self, location: Location, result: FetchResult) -> bool {
        let mut pending = self.pending.lock().unwrap();
        let idx = pending
            .iter()
            .position(|(loc, _)| *loc == location)
            .expect("no pending fetch for location");
        let (_, tx) = pending.remove(idx).unwrap();
        tx.send(result).is_ok()
    }
}

#[async_trait]
impl WeatherProvider for GatedWeather {
    async fn get_weather(&self, location: &Location) -> FetchResult {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().push_back((*location, tx));
        self.calls.fetch_add(1, Ordering::SeqCst);
        rx.await.unwrap_or_else(|_| Err(upstream_error()))
    }
}

/// Answers every fetch immediately, either with `observation` or an error.
#[derive(Debug)]
pub struct FixedWeather {
    observation: Option<WeatherObservation>,
    calls: AtomicUsize,
}

impl FixedWeather {
    pub fn ok(observation: WeatherObservation) -> Self {
        Self { observation: Some(observation), calls: AtomicUsize::new(0) }
    }

    pub fn failing() -> Self {
        Self { observation: None, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn get_weather(&self, _location: &Location) -> FetchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.observation.clone().ok_or_else(upstream_error)
    }
}

/// Location host with scripted permissions and a test-fed fix stream.
#[derive(Debug)]
pub struct ScriptedHost {
    fine: bool,
    coarse: bool,
    prompt_grants: Vec<PermissionGrant>,
    fixes: Mutex<Option<mpsc::Receiver<Option<Location>>>>,
    pub prompts: AtomicUsize,
    pub subscriptions: AtomicUsize,
}

impl ScriptedHost {
    /// Returns the host and the sender used to push fixes.
    pub fn new(
        fine: bool,
        coarse: bool,
        prompt_grants: Vec<PermissionGrant>,
    ) -> (Self, mpsc::Sender<Option<Location>>) {
        let (tx, rx) = mpsc::channel(16);
        let host = Self {
            fine,
            coarse,
            prompt_grants,
            fixes: Mutex::new(Some(rx)),
            prompts: AtomicUsize::new(0),
            subscriptions: AtomicUsize::new(0),
        };
        (host, tx)
    }

    pub fn granted() -> (Self, mpsc::Sender<Option<Location>>) {
        Self::new(true, true, vec![])
    }
}

#[async_trait]
impl LocationProvider for ScriptedHost {
    fn has_permission(&self, permission: Permission) -> bool {
        match permission {
            Permission::FineLocation => self.fine,
            Permission::CoarseLocation => self.coarse,
        }
    }

    async fn request_permissions(
        &self,
        request_code: i32,
        _permissions: &[Permission],
    ) -> PermissionResponse {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        PermissionResponse { request_code, grants: self.prompt_grants.clone() }
    }

    fn subscribe(&self, cancel: CancellationToken) -> mpsc::Receiver<Option<Location>> {
        self.subscriptions.fetch_add(1, Ordering::SeqCst);
        let mut source = self.fixes.lock().unwrap().take().expect("subscribed twice");
        let (tx, rx) = mpsc::channel(16);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    fix = source.recv() => match fix {
                        Some(fix) => {
                            if tx.send(fix).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    },
                }
            }
        });

        rx
    }
}

//! The landing screen: permission gate, location updates and weather binding.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::{
    WeatherView,
    gate::{GateOutcome, LocationGate},
    location::LocationProvider,
    projection::{FetchFailure, FetchPolicy, ProjectionEvent, WeatherProjection},
    provider::WeatherProvider,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ScreenIssue {
    PermissionDenied,
    FetchFailed(String),
}

impl std::fmt::Display for ScreenIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenIssue::PermissionDenied => f.write_str("location permission denied"),
            ScreenIssue::FetchFailed(message) => write!(f, "weather fetch failed: {message}"),
        }
    }
}

/// What the screen currently shows.
///
/// The spinner stays up until a view is bound. A failed fetch keeps the last
/// view and records the issue; the next success clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScreenState {
    pub view: Option<WeatherView>,
    pub issue: Option<ScreenIssue>,
}

impl ScreenState {
    pub fn is_loading(&self) -> bool {
        self.view.is_none()
    }
}

#[derive(Debug)]
pub struct LandingScreen {
    location: Arc<dyn LocationProvider>,
    gate: LocationGate,
    projection: WeatherProjection,
    state: watch::Sender<ScreenState>,
}

impl LandingScreen {
    pub fn new(
        location: Arc<dyn LocationProvider>,
        weather: Arc<dyn WeatherProvider>,
        policy: FetchPolicy,
    ) -> Self {
        let (state, _) = watch::channel(ScreenState::default());

        Self {
            gate: LocationGate::new(location.clone()),
            location,
            projection: WeatherProjection::new(weather, policy),
            state,
        }
    }

    pub fn state(&self) -> watch::Receiver<ScreenState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ScreenState {
        self.state.borrow().clone()
    }

    /// Activate the screen and keep it bound until `cancel` fires or the
    /// location stream ends and all fetches have settled.
    ///
    /// Returns the gate outcome. On denial nothing is subscribed; calling
    /// `run` again re-checks and re-prompts.
    pub async fn run(&self, cancel: CancellationToken) -> GateOutcome {
        let outcome = self.gate.ensure_access().await;
        if !outcome.allows_updates() {
            self.state.send_modify(|state| state.issue = Some(ScreenIssue::PermissionDenied));
            return outcome;
        }

        self.state.send_modify(|state| {
            if state.issue == Some(ScreenIssue::PermissionDenied) {
                state.issue = None;
            }
        });

        tracing::info!(?outcome, policy = %self.projection.policy(), "landing screen activated");
        let locations = self.location.subscribe(cancel.child_token());
        let events = self.projection.observe_settled(locations, cancel.child_token());
        self.bind(events, &cancel).await;

        tracing::info!("landing screen deactivated");
        outcome
    }

    /// Apply settled fetches in completion order until the stream closes or
    /// `cancel` fires.
    async fn bind(
        &self,
        mut events: mpsc::UnboundedReceiver<ProjectionEvent>,
        cancel: &CancellationToken,
    ) {
        loop {
            let event = tokio::select! {
                _ = cancel.cancelled() => break,
                event = events.recv() => event,
            };

            match event {
                Some(ProjectionEvent::Observed(view)) => {
                    tracing::info!(city = %view.city, icon = %view.icon, "binding weather");
                    self.state.send_modify(|state| {
                        state.view = Some(view);
                        state.issue = None;
                    });
                }
                Some(ProjectionEvent::Failed(FetchFailure { location, message })) => {
                    tracing::warn!(%location, %message, "weather unavailable");
                    self.state.send_modify(|state| {
                        state.issue = Some(ScreenIssue::FetchFailed(message));
                    });
                }
                None => break,
            }
        }
    }
}

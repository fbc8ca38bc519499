//! Turns a stream of location fixes into formatted weather views.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    Location, Resource, WeatherView,
    provider::WeatherProvider,
    resource::{fetch, settled},
};

/// What happens to an in-flight fetch when a newer fix arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchPolicy {
    /// Every fetch runs to completion; whichever finishes last is shown.
    #[default]
    LastWriteWins,
    /// A newer fix cancels the fetch for the previous one.
    CancelSuperseded,
}

impl FetchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchPolicy::LastWriteWins => "last-write-wins",
            FetchPolicy::CancelSuperseded => "cancel-superseded",
        }
    }
}

impl std::fmt::Display for FetchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for FetchPolicy {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "last-write-wins" => Ok(FetchPolicy::LastWriteWins),
            "cancel-superseded" => Ok(FetchPolicy::CancelSuperseded),
            _ => Err(anyhow::anyhow!(
                "Unknown fetch policy '{value}'. Supported policies: last-write-wins, cancel-superseded."
            )),
        }
    }
}

/// A fetch that settled with an error.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchFailure {
    pub location: Location,
    pub message: String,
}

/// A settled fetch, as delivered by [`WeatherProjection::observe_settled`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionEvent {
    Observed(WeatherView),
    Failed(FetchFailure),
}

/// Output of [`WeatherProjection::observe_weather_for`].
///
/// Both channels close once the location stream has ended (or the projection
/// was cancelled) and every in-flight fetch has settled. Ordering between the
/// two channels is not kept; use [`WeatherProjection::observe_settled`] when
/// it matters.
#[derive(Debug)]
pub struct ProjectionStreams {
    /// One view per successful fetch, in completion order.
    pub observations: mpsc::UnboundedReceiver<WeatherView>,
    pub failures: mpsc::UnboundedReceiver<FetchFailure>,
}

#[derive(Debug, Clone)]
pub struct WeatherProjection {
    provider: Arc<dyn WeatherProvider>,
    policy: FetchPolicy,
}

impl WeatherProjection {
    pub fn new(provider: Arc<dyn WeatherProvider>, policy: FetchPolicy) -> Self {
        Self { provider, policy }
    }

    pub fn policy(&self) -> FetchPolicy {
        self.policy
    }

    /// Issue one fetch per location fix and deliver successes and failures on
    /// separate channels.
    ///
    /// Empty fixes are skipped. Loading states are never emitted. Cancelling
    /// `cancel` stops reading fixes and abandons every in-flight fetch.
    pub fn observe_weather_for(
        &self,
        locations: mpsc::Receiver<Option<Location>>,
        cancel: CancellationToken,
    ) -> ProjectionStreams {
        let mut events = self.observe_settled(locations, cancel);
        let (obs_tx, obs_rx) = mpsc::unbounded_channel();
        let (fail_tx, fail_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                match event {
                    ProjectionEvent::Observed(view) => {
                        let _ = obs_tx.send(view);
                    }
                    ProjectionEvent::Failed(failure) => {
                        let _ = fail_tx.send(failure);
                    }
                }
            }
        });

        ProjectionStreams { observations: obs_rx, failures: fail_rx }
    }

    /// Same fetches as [`observe_weather_for`](Self::observe_weather_for), with
    /// successes and failures on one channel in completion order.
    ///
    /// The channel closes once the location stream has ended (or `cancel`
    /// fired) and every in-flight fetch has settled.
    pub fn observe_settled(
        &self,
        mut locations: mpsc::Receiver<Option<Location>>,
        cancel: CancellationToken,
    ) -> mpsc::UnboundedReceiver<ProjectionEvent> {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let provider = self.provider.clone();
        let policy = self.policy;

        tokio::spawn(async move {
            let mut current: Option<CancellationToken> = None;

            loop {
                let next = tokio::select! {
                    _ = cancel.cancelled() => break,
                    next = locations.recv() => next,
                };

                // Sender side gone: no more fixes.
                let Some(fix) = next else { break };

                let Some(location) = fix else {
                    tracing::debug!("skipping empty location fix");
                    continue;
                };

                let fetch_token = cancel.child_token();
                let superseded = current
                    .replace(fetch_token.clone())
                    .filter(|_| policy == FetchPolicy::CancelSuperseded);
                if let Some(previous) = superseded {
                    previous.cancel();
                }

                tracing::debug!(%location, %policy, "location fix received, fetching weather");
                let mut resource = fetch(provider.clone(), location, fetch_token.clone());
                let events_tx = events_tx.clone();

                tokio::spawn(async move {
                    let event = match settled(&mut resource, &fetch_token).await {
                        Some(Resource::Success(observation)) => ProjectionEvent::Observed(
                            WeatherView::from_observation(&observation, &Local::now()),
                        ),
                        Some(Resource::Error(message)) => {
                            ProjectionEvent::Failed(FetchFailure { location, message })
                        }
                        Some(Resource::Loading) | None => {
                            tracing::debug!(%location, "fetch abandoned before settling");
                            return;
                        }
                    };
                    let _ = events_tx.send(event);
                });
            }

            tracing::debug!("location stream closed, projection stopped");
        });

        events_rx
    }
}

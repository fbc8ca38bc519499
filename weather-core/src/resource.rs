//! One-shot fetches exposed as observable resources.

use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{Location, Resource, WeatherObservation, provider::WeatherProvider};

/// Start fetching weather for `location`.
///
/// The returned receiver starts at `Loading` and changes exactly once, to
/// `Success` or `Error`. If `cancel` fires first the value never leaves
/// `Loading` and the channel closes.
pub fn fetch(
    provider: Arc<dyn WeatherProvider>,
    location: Location,
    cancel: CancellationToken,
) -> watch::Receiver<Resource<WeatherObservation>> {
    let (tx, rx) = watch::channel(Resource::Loading);

    tokio::spawn(async move {
        let result = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(%location, "fetch cancelled");
                return;
            }
            result = provider.get_weather(&location) => result,
        };

        let resource = match result {
            Ok(observation) => Resource::Success(observation),
            Err(err) => {
                tracing::warn!(%location, error = %err, "weather fetch failed");
                Resource::Error(err.to_string())
            }
        };

        // Nobody listening any more is fine.
        let _ = tx.send(resource);
    });

    rx
}

/// Wait until `resource` settles. Returns `None` if `cancel` fires or the
/// fetch is abandoned before it settles.
pub async fn settled<T: Clone>(
    resource: &mut watch::Receiver<Resource<T>>,
    cancel: &CancellationToken,
) -> Option<Resource<T>> {
    loop {
        {
            let current = resource.borrow_and_update();
            if current.is_terminal() {
                return Some(current.clone());
            }
        }

        tokio::select! {
            _ = cancel.cancelled() => return None,
            changed = resource.changed() => changed.ok()?,
        }
    }
}

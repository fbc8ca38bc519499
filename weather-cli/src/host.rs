//! Terminal implementation of the location host.
//!
//! Permissions live in the config file; the prompt is an interactive confirm.
//! The fix is a fixed coordinate, reported once or on an interval.

use async_trait::async_trait;
use inquire::Confirm;
use minimal_weather_core::{
    Config, Location, LocationProvider, Permission, PermissionGrant, PermissionResponse,
};
use std::{sync::Mutex, time::Duration};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub struct TerminalHost {
    config: Mutex<Config>,
    location: Location,
    refresh: Option<Duration>,
}

impl TerminalHost {
    pub fn new(config: Config, location: Location, refresh: Option<Duration>) -> Self {
        Self { config: Mutex::new(config), location, refresh }
    }

    fn record_grant(&self) {
        let Ok(mut config) = self.config.lock() else {
            tracing::warn!("config lock poisoned, grant not recorded");
            return;
        };

        config.grant_location_permissions();
        if let Err(err) = config.save() {
            tracing::warn!(error = %err, "could not persist location permission");
        }
    }
}

#[async_trait]
impl LocationProvider for TerminalHost {
    fn has_permission(&self, permission: Permission) -> bool {
        let Ok(config) = self.config.lock() else {
            return false;
        };

        match permission {
            Permission::FineLocation => config.permissions.fine_location,
            Permission::CoarseLocation => config.permissions.coarse_location,
        }
    }

    async fn request_permissions(
        &self,
        request_code: i32,
        permissions: &[Permission],
    ) -> PermissionResponse {
        let names: Vec<_> = permissions.iter().map(Permission::as_str).collect();
        let message = format!("Allow minimal-weather to use your location ({})?", names.join(", "));

        let answer = tokio::task::spawn_blocking(move || {
            Confirm::new(&message).with_default(true).prompt()
        })
        .await;

        let grants = match answer {
            Ok(Ok(true)) => {
                self.record_grant();
                vec![PermissionGrant::Granted; permissions.len()]
            }
            Ok(Ok(false)) => vec![PermissionGrant::Denied; permissions.len()],
            // Prompt dismissed or not interactive.
            Ok(Err(err)) => {
                tracing::debug!(error = %err, "permission prompt dismissed");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(error = %err, "permission prompt task failed");
                Vec::new()
            }
        };

        PermissionResponse { request_code, grants }
    }

    fn subscribe(&self, cancel: CancellationToken) -> mpsc::Receiver<Option<Location>> {
        let (tx, rx) = mpsc::channel(1);
        let location = self.location;
        let refresh = self.refresh;

        tokio::spawn(async move {
            if tx.send(Some(location)).await.is_err() {
                return;
            }

            let Some(every) = refresh else { return };
            let mut ticker = tokio::time::interval(every);
            // The first tick fires immediately and the fix was already sent.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        tracing::debug!(%location, "re-reporting location");
                        if tx.send(Some(location)).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        rx
    }
}

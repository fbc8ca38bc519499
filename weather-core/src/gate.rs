use std::sync::Arc;

use crate::location::{LocationProvider, Permission, PermissionGrant, PermissionResponse};

/// Request code shared by the location prompt and its result, so the result
/// can be told apart from unrelated prompts.
pub const PERMISSION_REQUEST_CODE: i32 = 1420;

/// Permissions requested by the gate. Only the first one decides whether
/// updates start after a prompt.
pub const LOCATION_PERMISSIONS: [Permission; 2] =
    [Permission::CoarseLocation, Permission::FineLocation];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Both permissions were already held, no prompt was shown.
    AlreadyGranted,
    /// The user granted access through the prompt.
    Granted,
    Denied,
}

impl GateOutcome {
    pub fn allows_updates(&self) -> bool {
        !matches!(self, GateOutcome::Denied)
    }
}

/// Decides whether location updates may start.
#[derive(Debug, Clone)]
pub struct LocationGate {
    provider: Arc<dyn LocationProvider>,
}

impl LocationGate {
    pub fn new(provider: Arc<dyn LocationProvider>) -> Self {
        Self { provider }
    }

    /// True only when both fine and coarse location are held right now.
    pub fn is_location_permission_granted(&self) -> bool {
        self.provider.has_permission(Permission::FineLocation)
            && self.provider.has_permission(Permission::CoarseLocation)
    }

    pub async fn request_location_permission(&self) -> PermissionResponse {
        self.provider
            .request_permissions(PERMISSION_REQUEST_CODE, &LOCATION_PERMISSIONS)
            .await
    }

    /// Whether a prompt result lets updates start: it must carry our request
    /// code and grant the first requested permission.
    pub fn accepts(response: &PermissionResponse) -> bool {
        response.request_code == PERMISSION_REQUEST_CODE
            && response.grants.first() == Some(&PermissionGrant::Granted)
    }

    /// Check, and prompt if needed. A denial is final for this activation.
    pub async fn ensure_access(&self) -> GateOutcome {
        if self.is_location_permission_granted() {
            tracing::debug!("location permission already granted");
            return GateOutcome::AlreadyGranted;
        }

        tracing::info!("requesting location permission");
        let response = self.request_location_permission().await;

        if Self::accepts(&response) {
            tracing::info!("location permission granted");
            GateOutcome::Granted
        } else {
            tracing::info!(
                request_code = response.request_code,
                grants = ?response.grants,
                "location permission denied"
            );
            GateOutcome::Denied
        }
    }
}

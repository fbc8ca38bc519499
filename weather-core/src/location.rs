//! Host-side location services: permission checks, the permission prompt and
//! the stream of location fixes.

use async_trait::async_trait;
use std::fmt::Debug;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::model::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    FineLocation,
    CoarseLocation,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::FineLocation => "fine location",
            Permission::CoarseLocation => "coarse location",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionGrant {
    Granted,
    Denied,
}

/// Outcome of a permission prompt.
///
/// `grants` is index-aligned with the permissions that were requested. It is
/// empty when the user dismissed the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionResponse {
    pub request_code: i32,
    pub grants: Vec<PermissionGrant>,
}

#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    /// Current grant state of a single permission. Never cached.
    fn has_permission(&self, permission: Permission) -> bool;

    /// Prompt the user; resolves once they answer.
    async fn request_permissions(
        &self,
        request_code: i32,
        permissions: &[Permission],
    ) -> PermissionResponse;

    /// Start location updates. `None` items are fixes the host could not
    /// resolve. The stream ends when `cancel` fires.
    fn subscribe(&self, cancel: CancellationToken) -> mpsc::Receiver<Option<Location>>;
}

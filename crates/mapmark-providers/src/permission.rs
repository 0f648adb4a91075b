use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::BoxFuture;
use tracing::debug;

/// Request code used when asking for location access.
pub const LOCATION_PERMISSION_REQUEST_CODE: u32 = 1;

/// Outcome of a permission request, keyed by the code it was issued with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionResponse {
    pub request_code: u32,
    pub granted: bool,
}

pub trait PermissionProvider: Send + Sync {
    fn has_location_permission(&self) -> bool;

    /// Ask the user for location access. Resolves once they answer.
    fn request_location_permission(&self, request_code: u32) -> BoxFuture<'_, PermissionResponse>;
}

/// Permission state that answers every request the same way.
#[derive(Debug, Default)]
pub struct StaticPermissions {
    granted: AtomicBool,
    grant_on_request: bool,
}

impl StaticPermissions {
    pub const fn granted() -> Self {
        Self {
            granted: AtomicBool::new(true),
            grant_on_request: true,
        }
    }

    pub const fn denied() -> Self {
        Self {
            granted: AtomicBool::new(false),
            grant_on_request: false,
        }
    }

    /// Not yet granted, but the user will accept when asked.
    pub const fn grant_when_asked() -> Self {
        Self {
            granted: AtomicBool::new(false),
            grant_on_request: true,
        }
    }
}

impl PermissionProvider for StaticPermissions {
    fn has_location_permission(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    fn request_location_permission(&self, request_code: u32) -> BoxFuture<'_, PermissionResponse> {
        Box::pin(async move {
            if self.grant_on_request {
                self.granted.store(true, Ordering::SeqCst);
            }
            debug!(request_code, granted = self.grant_on_request, "Permission answered");
            PermissionResponse {
                request_code,
                granted: self.grant_on_request,
            }
        })
    }
}

use futures::future::BoxFuture;

use crate::{Coordinate, error::Result};

/// Source of the device's last known position.
pub trait LocationProvider: Send + Sync {
    /// Single attempt, no retry. `Ok(None)` means the platform has no fix.
    ///
    /// The returned future may take arbitrarily long or never resolve.
    fn last_known_location(&self) -> BoxFuture<'_, Result<Option<Coordinate>>>;
}

/// Always reports the same fix (or the same absence of one).
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLocation {
    fix: Option<Coordinate>,
}

impl StaticLocation {
    pub const fn new(fix: Coordinate) -> Self {
        Self { fix: Some(fix) }
    }

    pub const fn unknown() -> Self {
        Self { fix: None }
    }
}

impl LocationProvider for StaticLocation {
    fn last_known_location(&self) -> BoxFuture<'_, Result<Option<Coordinate>>> {
        let fix = self.fix;
        Box::pin(async move { Ok(fix) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_location() {
        let here = Coordinate::new(51.5074, -0.1278);
        assert_eq!(
            StaticLocation::new(here).last_known_location().await.unwrap(),
            Some(here)
        );
        assert_eq!(
            StaticLocation::unknown().last_known_location().await.unwrap(),
            None
        );
    }
}

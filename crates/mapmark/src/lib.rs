//! Mapmark - Place Search and Map Annotation
//!
//! Mapmark is the logic behind a single-screen map: the user types a place
//! name (or two, for a route), picks a suggestion or submits the query, and the
//! map is annotated with markers, decorative overlays and, for a route, a
//! connecting line and the great-circle distance.
//!
//! Rendering, geocoding, the device location and permissions are all external
//! and come in through [`MapSink`] and the provider traits re-exported from
//! [`providers`].
//!
//! # Quick Start
//!
//! ```rust
//! use mapmark::{MapController, RecordingMap, SessionConfigBuilder, SlotId};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let controller = MapController::builder()
//!     .config(SessionConfigBuilder::route().build())
//!     .build(RecordingMap::new());
//!
//! // Typing in a box fetches suggestions once the text is long enough
//! controller.on_query_text_change(SlotId::From, "Pari").await?;
//! let suggestions = controller.suggestions(SlotId::From).await?;
//! println!("{} suggestions", suggestions.len());
//!
//! // Tapping a suggestion binds it to the slot and redraws the map
//! controller.on_suggestion_click(SlotId::From, 0).await?;
//!
//! // Submitting a query binds its best match
//! controller.on_query_submit(SlotId::To, "London").await?;
//! println!("{}", controller.distance().await);
//! # Ok::<(), mapmark::error::MapmarkError>(())
//! # }).unwrap();
//! ```
//!
//! # Layouts
//!
//! - [`SearchLayout::Single`]: one search box, a cyan marker for the result
//! - [`SearchLayout::FromTo`]: from (green) and to (red) boxes, a swap button,
//!   a connecting line and the distance between them
//!
//! In both layouts the device location, once known, gets a magenta marker.
use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

pub mod annotation;
mod config;
mod controller;
pub mod error;
pub mod geo;
mod resolver;
mod session;

pub use annotation::{
    CircleOptions, Color, MapSink, MarkerHue, MarkerId, MarkerOptions, PolygonOptions,
    PolylineOptions, RecordingMap, RedrawSummary,
};
pub use config::{
    CameraConfig, LabelStyle, MapType, MapUiSettings, OverlayConfig, SearchLayout, SessionConfig,
    SessionConfigBuilder,
};
pub use controller::{MapController, MapControllerBuilder, SuggestOutcome};
pub use geo::{DistanceReadout, distance_km, rounded_distance_km};
pub use mapmark_providers as providers;
pub use mapmark_providers::Coordinate;
pub use resolver::{Candidate, Resolver, format_label, should_suggest};
pub use session::{RequestKind, RequestTicket, Resolved, Session, SessionError, Slot, SlotId};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Mapmark library.
///
/// This sets up structured logging with configurable levels and filtering.
/// `RUST_LOG`, when set, takes precedence over `level`.
///
/// # Examples
///
/// ```rust
/// use mapmark::init_logging;
/// use tracing::Level;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), mapmark::error::MapmarkError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), error::MapmarkError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?
            .add_directive("reqwest=warn".parse()?)
            .add_directive("hyper_util=warn".parse()?);

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .init();
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_env() {
        let _ = init_logging(tracing::Level::WARN);
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        setup_test_env();
        assert!(init_logging(tracing::Level::DEBUG).is_ok());
    }

    #[tokio::test]
    async fn test_embedded_controller() {
        setup_test_env();

        let controller = MapController::builder().build(RecordingMap::new());
        let picked = controller
            .on_query_submit(SlotId::From, "Berlin")
            .await
            .unwrap();
        assert!(picked.is_some(), "Should resolve Berlin from embedded data");
        assert_eq!(controller.distance().await, DistanceReadout::NotAvailable);
    }

    #[tokio::test]
    async fn test_single_layout_rejects_route_slots() {
        setup_test_env();

        let controller = MapController::builder()
            .config(SessionConfigBuilder::single_search().build())
            .build(RecordingMap::new());
        assert!(controller.on_query_submit(SlotId::From, "Berlin").await.is_err());
        assert!(controller.on_swap_click().await.is_err());
        assert!(
            controller
                .on_query_submit(SlotId::Single, "Berlin")
                .await
                .unwrap()
                .is_some()
        );
    }
}

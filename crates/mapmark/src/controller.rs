//! The screen controller: one owner for session state and the map.
//!
//! [`MapController`] receives UI events (text change, submit, suggestion
//! click, swap click, map and marker taps, map ready, permission result) and
//! the completions of the lookups they start. Session and map sit behind a
//! single lock, so a redraw always sees a consistent session. Geocoding runs
//! on tokio's blocking pool with the lock released; results come back through
//! the session's request tickets and are dropped if they have been superseded
//! in the meantime.
//!
//! # Quick Start
//!
//! ```rust
//! use mapmark::{MapController, RecordingMap, SlotId};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let controller = MapController::builder().build(RecordingMap::new());
//!
//! controller.on_query_submit(SlotId::From, "New York").await?;
//! controller.on_query_submit(SlotId::To, "Los Angeles").await?;
//!
//! assert_eq!(controller.distance().await.to_string(), "Distance: 3936 km");
//! # Ok::<(), mapmark::error::MapmarkError>(())
//! # }).unwrap();
//! ```

use std::sync::Arc;

use mapmark_providers::{
    Coordinate, Gazetteer, GeocodingProvider, LOCATION_PERMISSION_REQUEST_CODE, LocationProvider,
    PermissionProvider, PermissionResponse, StaticLocation, StaticPermissions,
};
use tokio::{sync::Mutex, task};
use tracing::{debug, info, instrument, warn};

use crate::{
    annotation::{self, MapSink, MarkerHue, MarkerId, MarkerOptions, RedrawSummary},
    config::SessionConfig,
    error::Result,
    geo::DistanceReadout,
    resolver::{Candidate, Resolver, should_suggest},
    session::{RequestKind, Session, SlotId},
};

type SharedResolver = Resolver<Arc<dyn GeocodingProvider>>;

/// What came of a keystroke in a search box.
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestOutcome {
    /// Query too short; no lookup was made and pending ones were superseded
    BelowThreshold,
    /// The slot's suggestion list was replaced with these
    Updated(Vec<Candidate>),
    /// Nothing found, or the lookup failed; the previous list stays
    NoMatches,
    /// A newer keystroke got there first; this result was dropped
    Superseded,
}

struct ControllerState<S> {
    session: Session,
    map: S,
    last_redraw: Option<RedrawSummary>,
}

impl<S: MapSink> ControllerState<S> {
    fn redraw(&mut self, config: &SessionConfig) -> RedrawSummary {
        let summary = annotation::redraw(&self.session, config, &mut self.map);
        self.last_redraw = Some(summary);
        summary
    }
}

pub struct MapController<S> {
    resolver: Arc<SharedResolver>,
    location: Arc<dyn LocationProvider>,
    permissions: Arc<dyn PermissionProvider>,
    config: SessionConfig,
    state: Mutex<ControllerState<S>>,
}

impl MapController<()> {
    pub fn builder() -> MapControllerBuilder {
        MapControllerBuilder::new()
    }
}

impl<S: MapSink> MapController<S> {
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Configure the map widget, then show the device position if allowed,
    /// asking for permission first if needed.
    #[instrument(name = "Map ready", level = "info", skip(self))]
    pub async fn on_map_ready(&self) {
        {
            let mut state = self.state.lock().await;
            state.map.apply_ui_settings(&self.config.ui);
            state.map.set_map_type(self.config.map_type);
        }

        if self.permissions.has_location_permission() {
            self.enable_my_location().await;
        } else {
            let response = self
                .permissions
                .request_location_permission(LOCATION_PERMISSION_REQUEST_CODE)
                .await;
            self.on_permission_result(response).await;
        }
    }

    /// Handle the answer to a permission request.
    #[instrument(name = "Permission result", level = "info", skip(self))]
    pub async fn on_permission_result(&self, response: PermissionResponse) {
        if response.request_code != LOCATION_PERMISSION_REQUEST_CODE {
            debug!("Ignoring unrelated permission result");
            return;
        }
        if response.granted && self.permissions.has_location_permission() {
            self.enable_my_location().await;
        } else {
            info!("Location permission denied, search only");
        }
    }

    async fn enable_my_location(&self) {
        {
            let mut state = self.state.lock().await;
            state.session.set_my_location_enabled(true);
            state.map.set_my_location_enabled(true);
        }
        self.refresh_current_location().await;
    }

    /// Ask once for the device's last known location and redraw with it.
    ///
    /// Returns `None`, changing nothing, without permission, without a fix,
    /// or when the provider fails.
    #[instrument(name = "Current location", level = "info", skip(self))]
    pub async fn refresh_current_location(&self) -> Option<Coordinate> {
        if !self.permissions.has_location_permission() {
            debug!("No location permission");
            return None;
        }
        match self.location.last_known_location().await {
            Ok(Some(fix)) => {
                let mut state = self.state.lock().await;
                state.session.set_device_location(Some(fix));
                state.redraw(&self.config);
                info!(%fix, "Device location updated");
                Some(fix)
            }
            Ok(None) => {
                warn!("Last known location is null");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to get location");
                None
            }
        }
    }

    /// A search box's text changed: record it and refresh its suggestions.
    #[instrument(name = "Query text change", level = "debug", skip(self))]
    pub async fn on_query_text_change(&self, slot: SlotId, text: &str) -> Result<SuggestOutcome> {
        let ticket = {
            let mut state = self.state.lock().await;
            state.session.set_query(slot, text)?;
            if !should_suggest(text, self.config.suggestion_threshold) {
                // Lookups for the longer text still in flight no longer apply.
                state.session.begin_request(slot, RequestKind::Suggest)?;
                return Ok(SuggestOutcome::BelowThreshold);
            }
            state.session.begin_request(slot, RequestKind::Suggest)?
        };

        let resolver = Arc::clone(&self.resolver);
        let limit = self.config.suggestion_limit;
        let query = text.to_owned();
        let candidates = match task::spawn_blocking(move || resolver.suggest(&query, limit)).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "Suggestion lookup did not complete");
                Vec::new()
            }
        };

        let mut state = self.state.lock().await;
        if !state.session.is_current(ticket) {
            debug!(generation = ticket.generation, "Suggestions superseded");
            return Ok(SuggestOutcome::Superseded);
        }
        if !state.session.apply_suggestions(ticket, candidates.clone())? {
            return Ok(SuggestOutcome::NoMatches);
        }
        Ok(SuggestOutcome::Updated(candidates))
    }

    /// A search box was submitted: bind its best match and redraw.
    ///
    /// `None` when nothing matched, the lookup failed, or a newer choice for
    /// the slot was made while it ran. Slot state is unchanged in all three.
    #[instrument(name = "Query submit", level = "info", skip(self))]
    pub async fn on_query_submit(&self, slot: SlotId, text: &str) -> Result<Option<Candidate>> {
        let ticket = {
            let mut state = self.state.lock().await;
            state.session.set_query(slot, text)?;
            state.session.begin_request(slot, RequestKind::Resolve)?
        };

        let resolver = Arc::clone(&self.resolver);
        let query = text.to_owned();
        let candidate = match task::spawn_blocking(move || resolver.resolve_exact(&query)).await {
            Ok(candidate) => candidate,
            Err(e) => {
                warn!(error = %e, "Exact lookup did not complete");
                None
            }
        };

        let mut state = self.state.lock().await;
        if !state.session.apply_exact(ticket, candidate.clone())? {
            return Ok(None);
        }
        state.redraw(&self.config);
        Ok(candidate)
    }

    /// A suggestion row was tapped.
    ///
    /// An index past the end of the slot's current list is ignored.
    #[instrument(name = "Suggestion click", level = "info", skip(self))]
    pub async fn on_suggestion_click(&self, slot: SlotId, index: usize) -> Result<Option<Candidate>> {
        let mut state = self.state.lock().await;
        let picked = state.session.select_suggestion(slot, index)?;
        if picked.is_some() {
            state.redraw(&self.config);
        }
        Ok(picked)
    }

    /// Swap the from and to boxes and redraw.
    #[instrument(name = "Swap click", level = "info", skip(self))]
    pub async fn on_swap_click(&self) -> Result<RedrawSummary> {
        let mut state = self.state.lock().await;
        state.session.swap()?;
        Ok(state.redraw(&self.config))
    }

    /// Bind a coordinate to `slot` directly and redraw.
    pub async fn set_resolved(
        &self,
        slot: SlotId,
        coordinate: Coordinate,
        label: &str,
    ) -> Result<RedrawSummary> {
        let mut state = self.state.lock().await;
        state.session.set_resolved(slot, coordinate, label)?;
        Ok(state.redraw(&self.config))
    }

    pub async fn redraw(&self) -> RedrawSummary {
        self.state.lock().await.redraw(&self.config)
    }

    /// Drop a "Clicked Here" marker where the map was tapped.
    ///
    /// The marker is not part of the session and goes away on the next redraw.
    pub async fn on_map_click(&self, at: Coordinate) -> MarkerId {
        debug!(%at, "Map clicked");
        self.state.lock().await.map.add_marker(MarkerOptions {
            position: at,
            title: "Clicked Here".to_string(),
            snippet: None,
            hue: MarkerHue::Red,
        })
    }

    /// Show the tapped marker's info window. Always consumes the tap.
    pub async fn on_marker_click(&self, marker: MarkerId) -> bool {
        self.state.lock().await.map.show_info_window(marker);
        true
    }

    /// Distance readout of the latest redraw.
    pub async fn distance(&self) -> DistanceReadout {
        self.state
            .lock()
            .await
            .last_redraw
            .map(|summary| summary.distance)
            .unwrap_or_default()
    }

    /// Current suggestion list for `slot`.
    pub async fn suggestions(&self, slot: SlotId) -> Result<Vec<Candidate>> {
        let state = self.state.lock().await;
        Ok(state.session.slot(slot)?.candidates().to_vec())
    }

    /// A copy of the current session state.
    pub async fn session(&self) -> Session {
        self.state.lock().await.session.clone()
    }

    /// Run `f` against the map sink.
    pub async fn with_map<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.lock().await.map)
    }
}

/// Builder for creating a [`MapController`] with custom providers.
pub struct MapControllerBuilder {
    geocoder: Option<Arc<dyn GeocodingProvider>>,
    location: Option<Arc<dyn LocationProvider>>,
    permissions: Option<Arc<dyn PermissionProvider>>,
    config: SessionConfig,
}

impl MapControllerBuilder {
    /// Create a new builder.
    ///
    /// Unless overridden: the embedded gazetteer, no device location and no
    /// location permission.
    #[must_use]
    pub fn new() -> Self {
        Self {
            geocoder: None,
            location: None,
            permissions: None,
            config: SessionConfig::default(),
        }
    }

    #[must_use]
    pub fn geocoder(mut self, geocoder: impl GeocodingProvider + 'static) -> Self {
        self.geocoder = Some(Arc::new(geocoder));
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl LocationProvider + 'static) -> Self {
        self.location = Some(Arc::new(location));
        self
    }

    #[must_use]
    pub fn permissions(mut self, permissions: impl PermissionProvider + 'static) -> Self {
        self.permissions = Some(Arc::new(permissions));
        self
    }

    #[must_use]
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the controller around `map`.
    pub fn build<S: MapSink>(self, map: S) -> MapController<S> {
        let geocoder = self
            .geocoder
            .unwrap_or_else(|| Arc::new(Gazetteer::embedded()));
        let resolver = Resolver::new(geocoder, self.config.label_style);
        MapController {
            resolver: Arc::new(resolver),
            location: self
                .location
                .unwrap_or_else(|| Arc::new(StaticLocation::unknown())),
            permissions: self
                .permissions
                .unwrap_or_else(|| Arc::new(StaticPermissions::denied())),
            state: Mutex::new(ControllerState {
                session: Session::new(self.config.layout),
                map,
                last_redraw: None,
            }),
            config: self.config,
        }
    }
}

impl Default for MapControllerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

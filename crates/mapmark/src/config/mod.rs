use std::time::Duration;

use crate::error::MapmarkError;

/// Which search boxes the screen shows.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchLayout {
    /// One free-form search box
    Single,
    /// A "from" and a "to" box with a swap button and distance readout
    #[default]
    FromTo,
}

/// How a geocoder address is turned into a one-line label.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    /// "Locality, Region, Country"
    #[default]
    LocalityRegionCountry,
    /// "Feature, Locality, Country"
    FeatureLocalityCountry,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapType {
    None,
    #[default]
    Normal,
    Satellite,
    Terrain,
    Hybrid,
}

/// Widget toggles applied once the map is ready.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct MapUiSettings {
    pub zoom_controls: bool,
    pub compass: bool,
    pub map_toolbar: bool,
    pub my_location_button: bool,
    pub tilt_gestures: bool,
    pub rotate_gestures: bool,
    pub scroll_gestures: bool,
    pub zoom_gestures: bool,
}

impl Default for MapUiSettings {
    fn default() -> Self {
        Self {
            zoom_controls: true,
            compass: true,
            map_toolbar: true,
            my_location_button: true,
            tilt_gestures: true,
            rotate_gestures: true,
            scroll_gestures: true,
            zoom_gestures: true,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Zoom level animated to after centering
    pub zoom: f32,
    /// Length of the zoom animation in milliseconds
    pub animation_ms: u64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom: 12.0,
            animation_ms: 2000,
        }
    }
}

impl CameraConfig {
    pub const fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }
}

/// Geometry of the decorations drawn around every marker.
///
/// Offsets are in degrees, not meters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayConfig {
    pub circle_radius_m: f64,
    pub offset_deg: f64,
    pub line_width: f32,
    /// Width of the from/to connecting line
    pub route_line_width: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            circle_radius_m: 1000.0,
            offset_deg: 0.01,
            line_width: 10.0,
            route_line_width: 10.0,
        }
    }
}

/// Everything a map session needs to know up front.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub layout: SearchLayout,
    /// Maximum number of suggestions fetched per keystroke
    pub suggestion_limit: usize,
    /// Suggestions are only fetched once the query is longer than this many characters
    pub suggestion_threshold: usize,
    pub label_style: LabelStyle,
    pub camera: CameraConfig,
    pub overlay: OverlayConfig,
    pub ui: MapUiSettings,
    pub map_type: MapType,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            layout: SearchLayout::default(),
            suggestion_limit: 5,
            suggestion_threshold: 2,
            label_style: LabelStyle::default(),
            camera: CameraConfig::default(),
            overlay: OverlayConfig::default(),
            ui: MapUiSettings::default(),
            map_type: MapType::default(),
        }
    }
}

impl SessionConfig {
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::new()
    }
}

/// Builder for creating session configurations with ergonomic defaults
#[derive(Debug, Clone, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Create a new builder with sensible defaults
    pub fn new() -> Self {
        Self {
            config: SessionConfig::default(),
        }
    }

    /// A single search box; results are labelled by feature name
    pub fn single_search() -> Self {
        let mut builder = Self::new();
        builder.config.layout = SearchLayout::Single;
        builder.config.label_style = LabelStyle::FeatureLocalityCountry;
        builder
    }

    /// From/to search boxes with route distance
    pub fn route() -> Self {
        let mut builder = Self::new();
        builder.config.layout = SearchLayout::FromTo;
        builder.config.label_style = LabelStyle::LocalityRegionCountry;
        builder
    }

    pub fn layout(mut self, layout: SearchLayout) -> Self {
        self.config.layout = layout;
        self
    }

    /// Set the number of suggestions fetched per keystroke
    pub fn suggestion_limit(mut self, limit: usize) -> Result<Self, MapmarkError> {
        if limit == 0 {
            return Err(MapmarkError::ConfigError(
                "Suggestion limit must be at least 1".to_string(),
            ));
        }
        self.config.suggestion_limit = limit;
        Ok(self)
    }

    /// Fetch suggestions only once the query is longer than `chars` characters
    pub fn suggestion_threshold(mut self, chars: usize) -> Self {
        self.config.suggestion_threshold = chars;
        self
    }

    pub fn label_style(mut self, style: LabelStyle) -> Self {
        self.config.label_style = style;
        self
    }

    /// Configure the zoom that follows every camera move
    pub fn camera(mut self, zoom: f32, animation: Duration) -> Result<Self, MapmarkError> {
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(MapmarkError::ConfigError(format!(
                "Camera zoom must be positive, got {zoom}"
            )));
        }
        self.config.camera = CameraConfig {
            zoom,
            animation_ms: u64::try_from(animation.as_millis()).unwrap_or(u64::MAX),
        };
        Ok(self)
    }

    /// Configure the circle, line and square drawn around markers
    pub fn overlay(
        mut self,
        circle_radius_m: f64,
        offset_deg: f64,
        line_width: f32,
    ) -> Result<Self, MapmarkError> {
        if !(circle_radius_m.is_finite() && circle_radius_m > 0.0) {
            return Err(MapmarkError::ConfigError(format!(
                "Circle radius must be positive, got {circle_radius_m}"
            )));
        }
        if !(offset_deg.is_finite() && offset_deg > 0.0) {
            return Err(MapmarkError::ConfigError(format!(
                "Overlay offset must be positive, got {offset_deg}"
            )));
        }
        self.config.overlay = OverlayConfig {
            circle_radius_m,
            offset_deg,
            line_width: line_width.max(0.0),
            ..self.config.overlay
        };
        Ok(self)
    }

    /// Width of the line joining the from and to markers
    pub fn route_line_width(mut self, width: f32) -> Self {
        self.config.overlay.route_line_width = width.max(0.0);
        self
    }

    pub fn ui_settings(mut self, ui: MapUiSettings) -> Self {
        self.config.ui = ui;
        self
    }

    pub fn map_type(mut self, map_type: MapType) -> Self {
        self.config.map_type = map_type;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SessionConfig {
        self.config
    }
}

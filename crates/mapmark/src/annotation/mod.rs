//! Deriving map annotations from session state.
//!
//! [`redraw`] wipes the map and draws everything again from a [`Session`]:
//! one marker per resolved slot plus the device location, three decorations
//! around every marker, the from/to connecting line, and the camera move. The
//! map is write-only from here; nothing is ever read back from a [`MapSink`].

mod recording;

use std::time::Duration;

use mapmark_providers::Coordinate;
pub use recording::RecordingMap;
use tracing::{debug, instrument};

use crate::{
    config::{MapType, MapUiSettings, OverlayConfig, SessionConfig},
    geo::DistanceReadout,
    session::{Session, SlotId},
};

/// Handle to a marker placed on a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// 8-bit ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Self = Self::argb(255, 255, 0, 0);
    pub const GREEN: Self = Self::argb(255, 0, 255, 0);
    pub const BLUE: Self = Self::argb(255, 0, 0, 255);

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn to_argb_u32(self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }
}

/// Marker icon tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerHue {
    Red,
    Green,
    Cyan,
    Magenta,
}

impl MarkerHue {
    /// Position on the color wheel, in degrees.
    pub const fn degrees(self) -> f32 {
        match self {
            Self::Red => 0.0,
            Self::Green => 120.0,
            Self::Cyan => 180.0,
            Self::Magenta => 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions {
    pub position: Coordinate,
    pub title: String,
    pub snippet: Option<String>,
    pub hue: MarkerHue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleOptions {
    pub center: Coordinate,
    pub radius_m: f64,
    pub stroke: Color,
    pub fill: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolylineOptions {
    pub points: Vec<Coordinate>,
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonOptions {
    pub points: Vec<Coordinate>,
    pub stroke: Color,
    pub fill: Color,
}

/// The map widget, as far as the core is concerned.
pub trait MapSink: Send {
    fn clear(&mut self);
    fn add_marker(&mut self, marker: MarkerOptions) -> MarkerId;
    fn add_circle(&mut self, circle: CircleOptions);
    fn add_polyline(&mut self, polyline: PolylineOptions);
    fn add_polygon(&mut self, polygon: PolygonOptions);
    fn move_camera(&mut self, target: Coordinate);
    fn animate_zoom(&mut self, zoom: f32, duration: Duration);
    fn show_info_window(&mut self, marker: MarkerId);
    /// Toggle the platform's live position dot.
    fn set_my_location_enabled(&mut self, enabled: bool);
    fn apply_ui_settings(&mut self, settings: &MapUiSettings);
    fn set_map_type(&mut self, map_type: MapType);
}

/// What a redraw produced, for the host's labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RedrawSummary {
    pub distance: DistanceReadout,
    pub markers: usize,
    pub camera_target: Option<Coordinate>,
}

const OVERLAY_FILL_ALPHA: u8 = 50;

fn slot_marker(slot: SlotId) -> (&'static str, MarkerHue) {
    match slot {
        SlotId::From => ("From", MarkerHue::Green),
        SlotId::To => ("To", MarkerHue::Red),
        SlotId::Single => ("Search", MarkerHue::Cyan),
    }
}

/// Marker for the device's own position.
pub fn device_marker(position: Coordinate) -> MarkerOptions {
    MarkerOptions {
        position,
        title: "My Location".to_string(),
        snippet: Some("You are here!".to_string()),
        hue: MarkerHue::Magenta,
    }
}

/// Circle, short diagonal line and square around `at`.
///
/// All three are sized in constant degrees (the circle in meters), so the
/// line and square narrow east-west toward the poles.
pub fn add_overlays<S: MapSink + ?Sized>(sink: &mut S, at: Coordinate, overlay: &OverlayConfig) {
    let d = overlay.offset_deg;
    sink.add_circle(CircleOptions {
        center: at,
        radius_m: overlay.circle_radius_m,
        stroke: Color::RED,
        fill: Color::argb(OVERLAY_FILL_ALPHA, 255, 0, 0),
    });
    sink.add_polyline(PolylineOptions {
        points: vec![at, at.offset(d, d)],
        width: overlay.line_width,
        color: Color::BLUE,
    });
    sink.add_polygon(PolygonOptions {
        points: vec![
            at.offset(-d, -d),
            at.offset(d, -d),
            at.offset(d, d),
            at.offset(-d, d),
        ],
        stroke: Color::GREEN,
        fill: Color::argb(OVERLAY_FILL_ALPHA, 0, 255, 0),
    });
}

/// Clear `sink` and draw `session` onto it.
#[instrument(name = "Redraw", level = "debug", skip_all)]
pub fn redraw<S: MapSink + ?Sized>(
    session: &Session,
    config: &SessionConfig,
    sink: &mut S,
) -> RedrawSummary {
    sink.clear();

    let mut markers = 0;
    for &slot in session.slot_ids() {
        let Some(resolved) = session.slot(slot).ok().and_then(|s| s.resolved()) else {
            continue;
        };
        let (title, hue) = slot_marker(slot);
        sink.add_marker(MarkerOptions {
            position: resolved.coordinate,
            title: title.to_string(),
            snippet: (!resolved.label.is_empty()).then(|| resolved.label.clone()),
            hue,
        });
        add_overlays(sink, resolved.coordinate, &config.overlay);
        markers += 1;
    }

    if let Some(device) = session.device_location() {
        sink.add_marker(device_marker(device));
        add_overlays(sink, device, &config.overlay);
        markers += 1;
    }

    let camera_target = session.camera_target();
    if let Some(target) = camera_target {
        sink.move_camera(target);
        sink.animate_zoom(config.camera.zoom, config.camera.animation());
    }

    let from = session.coordinate(SlotId::From);
    let to = session.coordinate(SlotId::To);
    if let (Some(a), Some(b)) = (from, to) {
        sink.add_polyline(PolylineOptions {
            points: vec![a, b],
            width: config.overlay.route_line_width,
            color: Color::BLUE,
        });
    }
    let distance = DistanceReadout::between(from, to);

    debug!(markers, %distance, "Redraw complete");
    RedrawSummary {
        distance,
        markers,
        camera_target,
    }
}

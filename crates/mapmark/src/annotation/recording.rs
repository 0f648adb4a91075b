use std::time::Duration;

use mapmark_providers::Coordinate;

use super::{CircleOptions, MapSink, MarkerId, MarkerOptions, PolygonOptions, PolylineOptions};
use crate::config::{MapType, MapUiSettings};

/// A [`MapSink`] that keeps what was drawn in memory.
///
/// Useful headless: for tests, for logging what a real map would show, or as
/// the model behind a custom renderer.
#[derive(Debug, Clone, Default)]
pub struct RecordingMap {
    next_marker: u64,
    markers: Vec<(MarkerId, MarkerOptions)>,
    circles: Vec<CircleOptions>,
    polylines: Vec<PolylineOptions>,
    polygons: Vec<PolygonOptions>,
    camera: Option<Coordinate>,
    zoom: Option<(f32, Duration)>,
    info_windows: Vec<MarkerId>,
    my_location_enabled: bool,
    ui_settings: Option<MapUiSettings>,
    map_type: Option<MapType>,
    clear_count: usize,
}

impl RecordingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[(MarkerId, MarkerOptions)] {
        &self.markers
    }

    pub fn marker(&self, id: MarkerId) -> Option<&MarkerOptions> {
        self.markers
            .iter()
            .find_map(|(marker_id, marker)| (*marker_id == id).then_some(marker))
    }

    pub fn circles(&self) -> &[CircleOptions] {
        &self.circles
    }

    pub fn polylines(&self) -> &[PolylineOptions] {
        &self.polylines
    }

    pub fn polygons(&self) -> &[PolygonOptions] {
        &self.polygons
    }

    /// Where the camera was last moved to. Survives `clear`.
    pub const fn camera(&self) -> Option<Coordinate> {
        self.camera
    }

    pub const fn zoom(&self) -> Option<(f32, Duration)> {
        self.zoom
    }

    pub fn info_windows(&self) -> &[MarkerId] {
        &self.info_windows
    }

    pub const fn my_location_enabled(&self) -> bool {
        self.my_location_enabled
    }

    pub const fn ui_settings(&self) -> Option<&MapUiSettings> {
        self.ui_settings.as_ref()
    }

    pub const fn map_type(&self) -> Option<MapType> {
        self.map_type
    }

    pub const fn clear_count(&self) -> usize {
        self.clear_count
    }
}

impl MapSink for RecordingMap {
    fn clear(&mut self) {
        self.markers.clear();
        self.circles.clear();
        self.polylines.clear();
        self.polygons.clear();
        self.info_windows.clear();
        self.clear_count += 1;
    }

    fn add_marker(&mut self, marker: MarkerOptions) -> MarkerId {
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;
        self.markers.push((id, marker));
        id
    }

    fn add_circle(&mut self, circle: CircleOptions) {
        self.circles.push(circle);
    }

    fn add_polyline(&mut self, polyline: PolylineOptions) {
        self.polylines.push(polyline);
    }

    fn add_polygon(&mut self, polygon: PolygonOptions) {
        self.polygons.push(polygon);
    }

    fn move_camera(&mut self, target: Coordinate) {
        self.camera = Some(target);
    }

    fn animate_zoom(&mut self, zoom: f32, duration: Duration) {
        self.zoom = Some((zoom, duration));
    }

    fn show_info_window(&mut self, marker: MarkerId) {
        if self.markers.iter().any(|(id, _)| *id == marker) {
            self.info_windows.push(marker);
        }
    }

    fn set_my_location_enabled(&mut self, enabled: bool) {
        self.my_location_enabled = enabled;
    }

    fn apply_ui_settings(&mut self, settings: &MapUiSettings) {
        self.ui_settings = Some(*settings);
    }

    fn set_map_type(&mut self, map_type: MapType) {
        self.map_type = Some(map_type);
    }
}

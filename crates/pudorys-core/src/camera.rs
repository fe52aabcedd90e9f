//! View transform between world meters and screen pixels.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::model::SavedView;

/// Rendering density: screen pixels per world meter at zoom 1.0.
pub const PX_PER_METER: f64 = 80.0;
/// Minimum allowed zoom.
pub const MIN_ZOOM: f64 = 0.25;
/// Maximum allowed zoom.
pub const MAX_ZOOM: f64 = 3.0;

/// Camera for the floor-plan viewport.
///
/// `screen = world * px_per_meter * zoom + pan`; [`Camera::screen_to_world`]
/// is the exact inverse. Zoom is clamped to `[MIN_ZOOM, MAX_ZOOM]` on every
/// write; pan is a free-form pixel offset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera {
    zoom: f64,
    pan: Vec2,
    px_per_meter: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(PX_PER_METER)
    }
}

impl Camera {
    pub fn new(px_per_meter: f64) -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            px_per_meter,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Effective pixels-per-meter at the current zoom.
    pub fn scale(&self) -> f64 {
        self.px_per_meter * self.zoom
    }

    /// Set the zoom level, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Multiply the zoom level, clamped to the allowed range.
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_zoom(self.zoom * factor);
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan = Vec2::new(x, y);
    }

    /// Reset to zoom 1.0 and no pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Vec2::ZERO;
    }

    /// Convert a world point (meters) to screen coordinates (pixels).
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.scale() + self.pan.x,
            world.y * self.scale() + self.pan.y,
        )
    }

    /// Convert a screen point (pixels) to world coordinates (meters).
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.scale(),
            (screen.y - self.pan.y) / self.scale(),
        )
    }

    /// Snapshot for the floor's saved-view block.
    pub fn saved_view(&self) -> SavedView {
        SavedView {
            zoom: self.zoom,
            pan_x: self.pan.x,
            pan_y: self.pan.y,
        }
    }

    /// Restore a saved view (zoom re-clamped defensively).
    pub fn apply_view(&mut self, view: SavedView) {
        self.set_zoom(view.zoom);
        self.set_pan(view.pan_x, view.pan_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_at_origin() {
        let camera = Camera::default();
        let screen = camera.world_to_screen(Point::new(1.0, 2.0));
        assert!((screen.x - 80.0).abs() < f64::EPSILON);
        assert!((screen.y - 160.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::default();
        camera.set_zoom(1.7);
        camera.set_pan(33.0, -12.5);

        let world = Point::new(4.25, 7.81);
        let back = camera.screen_to_world(camera.world_to_screen(world));
        assert!((back.x - world.x).abs() < 1e-10);
        assert!((back.y - world.y).abs() < 1e-10);
    }

    #[test]
    fn test_roundtrip_across_zoom_range() {
        for zoom in [MIN_ZOOM, 0.5, 1.0, 2.2, MAX_ZOOM] {
            let mut camera = Camera::default();
            camera.set_zoom(zoom);
            camera.set_pan(-250.0, 410.0);
            // Rooms up to ~50 m.
            let world = Point::new(49.9, 0.01);
            let back = camera.screen_to_world(camera.world_to_screen(world));
            assert!((back.x - world.x).abs() < 1e-9);
            assert!((back.y - world.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::default();
        camera.set_zoom(0.01);
        assert!((camera.zoom() - MIN_ZOOM).abs() < f64::EPSILON);

        camera.set_zoom(100.0);
        assert!((camera.zoom() - MAX_ZOOM).abs() < f64::EPSILON);

        camera.zoom_by(10.0);
        assert!((camera.zoom() - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset() {
        let mut camera = Camera::default();
        camera.set_zoom(2.0);
        camera.set_pan(10.0, 20.0);
        camera.reset();
        assert!((camera.zoom() - 1.0).abs() < f64::EPSILON);
        assert_eq!(camera.pan(), Vec2::ZERO);
    }

    #[test]
    fn test_saved_view_roundtrip() {
        let mut camera = Camera::default();
        camera.set_zoom(1.5);
        camera.set_pan(5.0, -8.0);

        let mut restored = Camera::default();
        restored.apply_view(camera.saved_view());
        assert!((restored.zoom() - 1.5).abs() < f64::EPSILON);
        assert_eq!(restored.pan(), Vec2::new(5.0, -8.0));
    }
}

//! 2D camera state
//!
//! Maintains the world-space target and zoom a viewer consumes. Nothing in
//! this crate draws; the matrices are for whatever front-end does.

use glam::{Mat4, Vec2, Vec3};

/// Smallest accepted zoom, in pixels per world unit
const MIN_ZOOM: f32 = 0.1;
/// Largest accepted zoom
const MAX_ZOOM: f32 = 1000.0;

/// Orthographic 2D camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2d {
    /// World-space point at the center of the view
    pub target: Vec2,
    /// Pixels per world unit
    pub zoom: f32,
}

impl Camera2d {
    /// Create a camera centered on the origin
    pub fn new() -> Self {
        Self {
            target: Vec2::ZERO,
            zoom: 10.0,
        }
    }

    /// Center the view on `target` at the given zoom level
    pub fn look_at(&mut self, target: Vec2, zoom: f32) {
        self.target = target;
        self.set_zoom(zoom);
    }

    /// Move the view center by a world-space delta
    pub fn pan(&mut self, delta: Vec2) {
        self.target += delta;
    }

    /// Set the zoom level, clamped to a sane range
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Multiply the zoom level by `factor`
    pub fn zoom_by(&mut self, factor: f32) {
        self.set_zoom(self.zoom * factor);
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-Vec3::new(self.target.x, self.target.y, 0.0))
    }

    /// Get the projection matrix for a viewport in pixels
    pub fn projection_matrix(&self, width: f32, height: f32) -> Mat4 {
        let half = self.world_extents(width, height) * 0.5;
        Mat4::orthographic_rh(-half.x, half.x, -half.y, half.y, -1.0, 1.0)
    }

    /// Get combined view-projection matrix for a viewport in pixels
    pub fn view_projection(&self, width: f32, height: f32) -> Mat4 {
        self.projection_matrix(width, height) * self.view_matrix()
    }

    /// Visible world-space width and height for a viewport in pixels
    pub fn world_extents(&self, width: f32, height: f32) -> Vec2 {
        Vec2::new(width, height) / self.zoom
    }
}

impl Default for Camera2d {
    fn default() -> Self {
        Self::new()
    }
}

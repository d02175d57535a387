//! Viewer state used for depth sorting and billboard orientation

use glam::{Mat4, Vec3};

/// Scroll step applied to `zoom` per wheel notch
const ZOOM_STEP: f32 = 0.05;
const MIN_ZOOM: f32 = 0.01;

/// A look-at camera with Z up
///
/// The simulation reads only `position`; the matrices and billboard axes are
/// for the renderer.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Look-at point
    pub centre: Vec3,
    pub up: Vec3,
    /// Multiplier on `fov`; smaller is closer
    pub zoom: f32,
    /// Vertical field of view at zoom 1, in radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(4.0, 0.0, 0.0),
            centre: Vec3::new(0.0, 0.0, 0.2),
            up: Vec3::Z,
            zoom: 0.3,
            fov: 0.5,
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the aspect ratio after a framebuffer resize
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Apply a scroll-wheel offset; positive scrolls zoom in
    pub fn scroll(&mut self, offset: f32) {
        self.zoom = (self.zoom - offset * ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.centre, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov * self.zoom, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space right and up axes of the view, for expanding billboards
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let view = self.view_matrix();
        (view.row(0).truncate(), view.row(1).truncate())
    }
}

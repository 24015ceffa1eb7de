use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::core::DisplayContext;

/// Fixed drawable height in pixels; only the width follows the window
pub const SURFACE_HEIGHT: u32 = 400;
pub const FOV_Y_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 1.4, 4.6);
pub const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 0.2, 0.0);

/// Owns the output surface size and keeps the camera aspect in step with it
#[derive(Debug, Clone)]
pub struct ViewportManager {
    width: u32,
    height: u32,
    camera: PerspectiveCamera,
}

impl ViewportManager {
    pub fn new(window_width: u32) -> Self {
        Self::with_height(window_width, SURFACE_HEIGHT)
    }

    pub fn with_height(window_width: u32, height: u32) -> Self {
        let camera = PerspectiveCamera::new(
            FOV_Y_DEGREES,
            aspect(window_width, height),
            NEAR_PLANE,
            FAR_PLANE,
        )
        .looking_at(CAMERA_POSITION, CAMERA_TARGET);

        Self {
            width: window_width,
            height,
            camera,
        }
    }

    /// Take the new window width; height and every other camera parameter stay
    pub fn resize(&mut self, window_width: u32) {
        self.width = window_width;
        self.camera.aspect = aspect(window_width, self.height);
        log::trace!("viewport resized to {}x{}", self.width, self.height);
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn display_context(&self) -> DisplayContext {
        DisplayContext::new(self.width, self.height)
    }
}

fn aspect(width: u32, height: u32) -> f32 {
    width as f32 / height as f32
}

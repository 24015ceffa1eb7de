use glam::{Mat4, Vec3};

use crate::math::Ray;

/// Perspective camera aimed at a fixed target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
        }
    }

    pub fn looking_at(mut self, position: Vec3, target: Vec3) -> Self {
        self.position = position;
        self.target = target;
        self
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }

    /// Ray through the center of pixel (`px`, `py`) of a `width` x `height`
    /// image, with y growing downward
    pub fn primary_ray(&self, px: u32, py: u32, width: u32, height: u32) -> Ray {
        self.ray_through(px as f32 + 0.5, py as f32 + 0.5, width, height)
    }

    /// Ray through the continuous image point (`x`, `y`), measured in pixels
    /// from the top-left corner
    pub fn ray_through(&self, x: f32, y: f32, width: u32, height: u32) -> Ray {
        let half_height = (self.fov_y.to_radians() * 0.5).tan();
        let half_width = half_height * self.aspect;

        let ndc_x = 2.0 * x / width as f32 - 1.0;
        let ndc_y = 1.0 - 2.0 * y / height as f32;

        let dir = self.forward() + self.right() * ndc_x * half_width + self.up() * ndc_y * half_height;
        Ray::new(self.position, dir.normalize())
    }
}

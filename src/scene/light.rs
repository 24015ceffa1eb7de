use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Parallel light shining from `position` toward `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl DirectionalLight {
    /// Unit vector pointing from a surface toward the light
    pub fn to_light(&self) -> Vec3 {
        (self.position - self.target).normalize_or_zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
    pub background: [f32; 3],
}

impl Default for Lighting {
    /// Soft white fill, a key light up and to the right, black backdrop
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: [1.0, 1.0, 1.0],
                intensity: 0.8,
            },
            directional: DirectionalLight {
                color: [1.0, 1.0, 1.0],
                intensity: 0.6,
                position: Vec3::new(4.0, 6.0, 5.0),
                target: Vec3::ZERO,
            },
            background: [0.0, 0.0, 0.0],
        }
    }
}

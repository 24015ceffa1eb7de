use std::f32::consts::TAU;
use std::rc::Rc;

use glam::Vec3;

use super::material::Material;
use crate::math::AABB;

/// Primitive solid, centered on its local origin. Cylinders and cones stand
/// along +Y with the cone apex at `+height / 2`.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Box { width: f32, height: f32, depth: f32 },
    Sphere { radius: f32, width_segments: u32, height_segments: u32 },
    Cylinder { radius: f32, height: f32, radial_segments: u32 },
    Cone { radius: f32, height: f32, radial_segments: u32 },
}

impl ShapeKind {
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        ShapeKind::Box { width, height, depth }
    }

    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        ShapeKind::Sphere { radius, width_segments, height_segments }
    }

    pub fn cylinder(radius: f32, height: f32, radial_segments: u32) -> Self {
        ShapeKind::Cylinder { radius, height, radial_segments }
    }

    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        ShapeKind::Cone { radius, height, radial_segments }
    }

    pub fn local_bounds(&self) -> AABB {
        let half = match *self {
            ShapeKind::Box { width, height, depth } => Vec3::new(width, height, depth) * 0.5,
            ShapeKind::Sphere { radius, .. } => Vec3::splat(radius),
            ShapeKind::Cylinder { radius, height, .. } | ShapeKind::Cone { radius, height, .. } => {
                Vec3::new(radius, height * 0.5, radius)
            }
        };
        AABB::new(-half, half)
    }

    /// Faceted surface of a cone: one side triangle per segment plus a
    /// base fan. Other kinds are traced analytically and return nothing.
    pub fn triangles(&self) -> Vec<[Vec3; 3]> {
        let ShapeKind::Cone { radius, height, radial_segments } = *self else {
            return Vec::new();
        };

        let segments = radial_segments.max(3);
        let half = height * 0.5;
        let apex = Vec3::new(0.0, half, 0.0);
        let base_center = Vec3::new(0.0, -half, 0.0);
        // First rim vertex sits on +Z, winding toward +X
        let rim = |i: u32| {
            let theta = i as f32 / segments as f32 * TAU;
            Vec3::new(radius * theta.sin(), -half, radius * theta.cos())
        };

        (0..segments)
            .flat_map(|i| {
                let (a, b) = (rim(i), rim(i + 1));
                [[a, b, apex], [base_center, b, a]]
            })
            .collect()
    }
}

/// Immutable primitive paired with its shared material
#[derive(Debug, Clone)]
pub struct ShapeDescriptor {
    pub kind: ShapeKind,
    pub material: Rc<Material>,
}

impl ShapeDescriptor {
    pub fn new(kind: ShapeKind, material: Rc<Material>) -> Self {
        Self { kind, material }
    }
}

use glam::Vec3;

use crate::math::{intersect_aabb, Ray};
use crate::scene::ShapeKind;

/// Hits closer than this are treated as self-intersections
pub const MIN_HIT_DISTANCE: f32 = 1e-4;

/// Hit in the shape's local space. `normal` points out of the solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalHit {
    pub t: f32,
    pub normal: Vec3,
}

/// Nearest hit of a local-space ray with a shape. `facets` is only read for
/// cones and holds their precomputed triangles.
pub fn intersect_shape(kind: &ShapeKind, facets: &[[Vec3; 3]], ray: &Ray) -> Option<LocalHit> {
    match *kind {
        ShapeKind::Box { width, height, depth } => {
            intersect_box(ray, Vec3::new(width, height, depth) * 0.5)
        }
        ShapeKind::Sphere { radius, .. } => intersect_sphere(ray, radius),
        ShapeKind::Cylinder { radius, height, .. } => intersect_cylinder(ray, radius, height * 0.5),
        ShapeKind::Cone { .. } => intersect_facets(ray, facets),
    }
}

fn intersect_box(ray: &Ray, half: Vec3) -> Option<LocalHit> {
    let t = intersect_aabb(ray.origin, ray.dir, -half, half)?;
    if t < MIN_HIT_DISTANCE {
        return None;
    }

    // The face hit is the axis where the point lies deepest relative to the extent
    let p = ray.at(t) / half;
    let a = p.abs();
    let normal = if a.x >= a.y && a.x >= a.z {
        Vec3::new(p.x.signum(), 0.0, 0.0)
    } else if a.y >= a.z {
        Vec3::new(0.0, p.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, p.z.signum())
    };

    Some(LocalHit { t, normal })
}

fn intersect_sphere(ray: &Ray, radius: f32) -> Option<LocalHit> {
    let oc = ray.origin;
    let a = ray.dir.dot(ray.dir);
    let half_b = oc.dot(ray.dir);
    let c = oc.dot(oc) - radius * radius;

    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t = [(-half_b - sqrt_d) / a, (-half_b + sqrt_d) / a]
        .into_iter()
        .find(|&t| t > MIN_HIT_DISTANCE)?;

    Some(LocalHit {
        t,
        normal: ray.at(t) / radius,
    })
}

fn intersect_cylinder(ray: &Ray, radius: f32, half_height: f32) -> Option<LocalHit> {
    let (o, d) = (ray.origin, ray.dir);
    let r2 = radius * radius;
    let mut best: Option<LocalHit> = None;
    let mut consider = |hit: LocalHit| {
        if hit.t > MIN_HIT_DISTANCE && best.map_or(true, |b| hit.t < b.t) {
            best = Some(hit);
        }
    };

    // Side wall: x^2 + z^2 = r^2 within the height band
    let a = d.x * d.x + d.z * d.z;
    if a > f32::EPSILON {
        let half_b = o.x * d.x + o.z * d.z;
        let c = o.x * o.x + o.z * o.z - r2;
        let discriminant = half_b * half_b - a * c;
        if discriminant >= 0.0 {
            let sqrt_d = discriminant.sqrt();
            for t in [(-half_b - sqrt_d) / a, (-half_b + sqrt_d) / a] {
                let p = ray.at(t);
                if p.y.abs() <= half_height {
                    consider(LocalHit {
                        t,
                        normal: Vec3::new(p.x, 0.0, p.z) / radius,
                    });
                }
            }
        }
    }

    // End caps
    if d.y.abs() > f32::EPSILON {
        for cap_y in [half_height, -half_height] {
            let t = (cap_y - o.y) / d.y;
            let p = ray.at(t);
            if p.x * p.x + p.z * p.z <= r2 {
                consider(LocalHit {
                    t,
                    normal: Vec3::new(0.0, cap_y.signum(), 0.0),
                });
            }
        }
    }

    best
}

/// Möller-Trumbore over a closed triangle list. Normals are flipped to face
/// away from the centroid so they point outward regardless of winding.
fn intersect_facets(ray: &Ray, facets: &[[Vec3; 3]]) -> Option<LocalHit> {
    facets
        .iter()
        .filter_map(|tri| {
            let t = moller_trumbore(ray, tri)?;
            let mut normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize_or_zero();
            let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
            if normal.dot(centroid) < 0.0 {
                normal = -normal;
            }
            Some(LocalHit { t, normal })
        })
        .min_by(|a, b| a.t.total_cmp(&b.t))
}

fn moller_trumbore(ray: &Ray, [v0, v1, v2]: &[Vec3; 3]) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = *v1 - *v0;
    let edge2 = *v2 - *v0;

    let h = ray.dir.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - *v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > MIN_HIT_DISTANCE).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_z(origin: Vec3) -> Ray {
        Ray::new(origin, Vec3::NEG_Z)
    }

    #[test]
    fn test_box_front_face() {
        let kind = ShapeKind::cuboid(2.0, 2.0, 2.0);
        let hit = intersect_shape(&kind, &[], &down_z(Vec3::new(0.2, 0.3, 5.0))).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Z);
    }

    #[test]
    fn test_box_thin_slab_normal() {
        let kind = ShapeKind::cuboid(0.08, 0.45, 0.04);
        let hit = intersect_shape(&kind, &[], &down_z(Vec3::new(0.03, 0.2, 1.0))).unwrap();
        assert_eq!(hit.normal, Vec3::Z);
    }

    #[test]
    fn test_sphere_hit_and_miss() {
        let kind = ShapeKind::sphere(1.0, 16, 16);
        let hit = intersect_shape(&kind, &[], &down_z(Vec3::new(0.0, 0.0, 5.0))).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);

        assert!(intersect_shape(&kind, &[], &down_z(Vec3::new(2.0, 0.0, 5.0))).is_none());
    }

    #[test]
    fn test_sphere_from_inside_returns_exit() {
        let kind = ShapeKind::sphere(5.0, 16, 16);
        let hit = intersect_shape(&kind, &[], &Ray::new(Vec3::ZERO, Vec3::X)).unwrap();
        assert!((hit.t - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_cylinder_side_and_cap() {
        let kind = ShapeKind::cylinder(2.0, 0.15, 32);

        let side = intersect_shape(&kind, &[], &down_z(Vec3::new(0.0, 0.0, 5.0))).unwrap();
        assert!((side.t - 3.0).abs() < 1e-5);
        assert!((side.normal - Vec3::Z).length() < 1e-5);

        let cap = intersect_shape(&kind, &[], &Ray::new(Vec3::new(0.5, 3.0, 0.0), Vec3::NEG_Y)).unwrap();
        assert!((cap.t - (3.0 - 0.075)).abs() < 1e-5);
        assert_eq!(cap.normal, Vec3::Y);

        let miss = Ray::new(Vec3::new(2.5, 3.0, 0.0), Vec3::NEG_Y);
        assert!(intersect_shape(&kind, &[], &miss).is_none());
    }

    #[test]
    fn test_cone_facets() {
        let kind = ShapeKind::cone(1.0, 2.0, 3);
        let facets = kind.triangles();

        // Straight down onto the apex region hits a side facing up
        let hit = intersect_shape(&kind, &facets, &Ray::new(Vec3::new(0.05, 5.0, 0.1), Vec3::NEG_Y)).unwrap();
        assert!(hit.normal.y > 0.0);
        assert!(hit.t < 5.0);

        // From below the base hits the base fan
        let base = intersect_shape(&kind, &facets, &Ray::new(Vec3::new(0.05, -5.0, 0.1), Vec3::Y)).unwrap();
        assert!((base.t - 4.0).abs() < 1e-5);
        assert!((base.normal - Vec3::NEG_Y).length() < 1e-5);
    }

    #[test]
    fn test_behind_origin_is_ignored() {
        let kind = ShapeKind::cuboid(1.0, 1.0, 1.0);
        assert!(intersect_shape(&kind, &[], &Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z)).is_none());
    }
}

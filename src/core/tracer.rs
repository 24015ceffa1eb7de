use glam::{Mat3, Mat4, Vec3};

use super::display_context::DisplayContext;
use super::primitive::{intersect_shape, MIN_HIT_DISTANCE};
use crate::camera::PerspectiveCamera;
use crate::math::{to_rgba8, Ray, AABB};
use crate::scene::{Lighting, NodeId, SceneGraph, ShapeKind};

const SHADOW_BIAS: f32 = 1e-3;
const SHININESS: f32 = 32.0;

/// Default supersampling grid; 2 gives 4 rays per pixel
pub const DEFAULT_SAMPLES_PER_AXIS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceOptions {
    pub shadows: bool,
    /// Each pixel averages an N x N grid of sub-pixel rays. 1 disables
    /// antialiasing.
    pub samples_per_axis: u32,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            shadows: true,
            samples_per_axis: DEFAULT_SAMPLES_PER_AXIS,
        }
    }
}

/// Shaped node flattened into world space for one frame
#[derive(Debug, Clone)]
struct Primitive {
    node: NodeId,
    kind: ShapeKind,
    facets: Vec<[Vec3; 3]>,
    color: Vec3,
    roughness: f32,
    world_to_local: Mat4,
    normal_matrix: Mat3,
    bounds: AABB,
    cast_shadow: bool,
    receive_shadow: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub t: f32,
    pub point: Vec3,
    /// World-space normal facing back along the ray
    pub normal: Vec3,
    pub node: NodeId,
    index: usize,
}

/// Snapshot of the visible scene, ready for ray queries
#[derive(Debug, Clone)]
pub struct PreparedScene {
    primitives: Vec<Primitive>,
    bounds: AABB,
    lighting: Lighting,
}

impl PreparedScene {
    pub fn from_graph(scene: &SceneGraph) -> Self {
        let primitives: Vec<Primitive> = scene
            .visible_items()
            .into_iter()
            .filter_map(|item| {
                let shape = item.node.shape.as_ref()?;
                Some(Primitive {
                    node: item.id,
                    facets: shape.kind.triangles(),
                    kind: shape.kind.clone(),
                    color: Vec3::from(shape.material.color),
                    roughness: shape.material.roughness,
                    world_to_local: item.world.inverse(),
                    normal_matrix: Mat3::from_mat4(item.world).inverse().transpose(),
                    bounds: shape.kind.local_bounds().transformed(&item.world),
                    cast_shadow: item.node.cast_shadow,
                    receive_shadow: item.node.receive_shadow,
                })
            })
            .collect();

        let bounds = primitives
            .iter()
            .fold(AABB::empty(), |acc, p| acc.union(&p.bounds));

        Self {
            primitives,
            bounds,
            lighting: scene.lighting,
        }
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn bounds(&self) -> AABB {
        self.bounds
    }

    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let mut nearest: Option<Hit> = None;

        for (index, prim) in self.primitives.iter().enumerate() {
            if !prim.bounds.hit(ray) {
                continue;
            }

            let local_ray = ray.transformed(&prim.world_to_local);
            let Some(local) = intersect_shape(&prim.kind, &prim.facets, &local_ray) else {
                continue;
            };
            if nearest.is_some_and(|n| local.t >= n.t) {
                continue;
            }

            let mut normal = (prim.normal_matrix * local.normal).normalize_or_zero();
            if normal.dot(ray.dir) > 0.0 {
                normal = -normal;
            }

            nearest = Some(Hit {
                t: local.t,
                point: ray.at(local.t),
                normal,
                node: prim.node,
                index,
            });
        }

        nearest
    }

    /// Whether any shadow caster lies along `dir` from `origin`
    pub fn occluded(&self, origin: Vec3, dir: Vec3) -> bool {
        let ray = Ray::new(origin, dir);
        self.primitives
            .iter()
            .filter(|prim| prim.cast_shadow && prim.bounds.hit(&ray))
            .any(|prim| {
                let local_ray = ray.transformed(&prim.world_to_local);
                intersect_shape(&prim.kind, &prim.facets, &local_ray)
                    .is_some_and(|hit| hit.t > MIN_HIT_DISTANCE)
            })
    }
}

/// CPU ray tracer for the puppet scene: one primary ray per pixel, ambient
/// plus one directional light, hard shadows on receiving surfaces
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneTracer {
    options: TraceOptions,
}

impl SceneTracer {
    pub fn new(options: TraceOptions) -> Self {
        Self { options }
    }

    /// Trace a full frame, row-major from the top-left pixel
    pub fn render(&self, scene: &SceneGraph, camera: &PerspectiveCamera, context: DisplayContext) -> Vec<[u8; 4]> {
        let prepared = PreparedScene::from_graph(scene);
        let (width, height) = (context.width, context.height);

        (0..height)
            .flat_map(|py| (0..width).map(move |px| (px, py)))
            .map(|(px, py)| to_rgba8(self.sample_pixel(&prepared, camera, px, py, context).to_array()))
            .collect()
    }

    /// Box-filtered average over the pixel's sub-sample grid. Samples are
    /// clamped first so a blown-out highlight cannot bleed into its neighbours.
    fn sample_pixel(
        &self,
        prepared: &PreparedScene,
        camera: &PerspectiveCamera,
        px: u32,
        py: u32,
        context: DisplayContext,
    ) -> Vec3 {
        let n = self.options.samples_per_axis.max(1);
        let step = 1.0 / n as f32;
        let background = Vec3::from(prepared.lighting.background);

        let sum: Vec3 = (0..n * n)
            .map(|s| {
                let x = px as f32 + (s % n) as f32 * step + step * 0.5;
                let y = py as f32 + (s / n) as f32 * step + step * 0.5;
                let ray = camera.ray_through(x, y, context.width, context.height);
                if prepared.bounds.hit(&ray) {
                    self.trace(prepared, &ray).clamp(Vec3::ZERO, Vec3::ONE)
                } else {
                    background
                }
            })
            .sum();

        sum / (n * n) as f32
    }

    /// Linear radiance seen along `ray`
    pub fn trace(&self, prepared: &PreparedScene, ray: &Ray) -> Vec3 {
        let lighting = &prepared.lighting;
        let Some(hit) = prepared.intersect(ray) else {
            return Vec3::from(lighting.background);
        };
        let prim = &prepared.primitives[hit.index];

        let light = &lighting.directional;
        let to_light = light.to_light();
        let n_dot_l = hit.normal.dot(to_light).max(0.0);

        let shadowed = self.options.shadows
            && prim.receive_shadow
            && n_dot_l > 0.0
            && prepared.occluded(hit.point + hit.normal * SHADOW_BIAS, to_light);
        let visibility = if shadowed { 0.0 } else { 1.0 };

        let ambient = Vec3::from(lighting.ambient.color) * lighting.ambient.intensity;
        let direct = Vec3::from(light.color) * light.intensity * n_dot_l * visibility;

        // Paper is rough, so the highlight is faint
        let half = (to_light - ray.dir).normalize_or_zero();
        let specular = if n_dot_l > 0.0 {
            (1.0 - prim.roughness) * hit.normal.dot(half).max(0.0).powf(SHININESS) * light.intensity * visibility
        } else {
            0.0
        };

        prim.color * (ambient + direct) + Vec3::splat(specular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{MaterialRegistry, SceneNode, ShapeDescriptor, Swatch};

    fn shadow_scene() -> (SceneGraph, NodeId) {
        let materials = MaterialRegistry::new();
        let mut scene = SceneGraph::new();
        let floor = scene.add_root(
            SceneNode::mesh(
                "floor",
                ShapeDescriptor::new(ShapeKind::cuboid(10.0, 0.1, 10.0), materials.get(Swatch::White)),
            )
            .receiving_shadow(),
        );
        let to_light = scene.lighting.directional.to_light();
        scene.add_root(
            SceneNode::mesh(
                "blocker",
                ShapeDescriptor::new(ShapeKind::cuboid(1.0, 1.0, 1.0), materials.get(Swatch::Black)),
            )
            .at(to_light * 3.0)
            .casting_shadow(),
        );
        (scene, floor)
    }

    #[test]
    fn test_empty_scene_is_background() {
        let scene = SceneGraph::new();
        let prepared = PreparedScene::from_graph(&scene);
        assert!(prepared.is_empty());
        assert!(prepared.bounds().is_empty());

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(SceneTracer::default().trace(&prepared, &ray), Vec3::ZERO);
    }

    #[test]
    fn test_hit_reports_node_and_facing_normal() {
        let (scene, floor) = shadow_scene();
        let prepared = PreparedScene::from_graph(&scene);
        let ray = Ray::new(Vec3::new(-3.0, 5.0, -3.0), Vec3::NEG_Y);

        let hit = prepared.intersect(&ray).unwrap();
        assert_eq!(hit.node, floor);
        assert!((hit.t - 4.95).abs() < 1e-4);
        assert!((hit.normal - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_shadow_darkens_receiver() {
        let (scene, _) = shadow_scene();
        let prepared = PreparedScene::from_graph(&scene);
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);

        let lit = SceneTracer::new(TraceOptions { shadows: false, ..TraceOptions::default() }).trace(&prepared, &ray);
        let shaded = SceneTracer::new(TraceOptions::default()).trace(&prepared, &ray);

        assert!(shaded.x < lit.x);
        // In shadow only the ambient term remains
        assert!((shaded.x - 0.8).abs() < 1e-4);
    }

    #[test]
    fn test_hidden_nodes_are_not_prepared() {
        let (mut scene, floor) = shadow_scene();
        assert_eq!(PreparedScene::from_graph(&scene).len(), 2);

        scene.node_mut(floor).visible = false;
        assert_eq!(PreparedScene::from_graph(&scene).len(), 1);
    }

    /// Camera on +Z with a 90 degree view; the box's left edge projects just
    /// right of the center of pixel column 2 in a 4 x 4 frame
    fn edge_scene() -> (SceneGraph, PerspectiveCamera) {
        let materials = MaterialRegistry::new();
        let mut scene = SceneGraph::new();
        scene.add_root(
            SceneNode::mesh(
                "slab",
                ShapeDescriptor::new(ShapeKind::cuboid(8.5, 10.0, 1.0), materials.get(Swatch::White)),
            )
            .at(Vec3::new(5.75, 0.0, -0.5)),
        );
        let camera = PerspectiveCamera::new(90.0, 1.0, 0.1, 100.0).looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        (scene, camera)
    }

    #[test]
    fn test_supersampling_blends_silhouette() {
        let (scene, camera) = edge_scene();
        let context = DisplayContext::new(4, 4);
        let edge = 4 + 2;

        let aliased = SceneTracer::new(TraceOptions {
            samples_per_axis: 1,
            ..TraceOptions::default()
        })
        .render(&scene, &camera, context);
        let smooth = SceneTracer::new(TraceOptions {
            samples_per_axis: 4,
            ..TraceOptions::default()
        })
        .render(&scene, &camera, context);

        assert_eq!(aliased[edge], [0, 0, 0, 255]);
        assert!(smooth[edge][0] > 0 && smooth[edge][0] < 255);

        // Pixels fully inside or outside the slab are unchanged
        assert_eq!(smooth[4], aliased[4]);
        assert_eq!(smooth[4 + 3], aliased[4 + 3]);
    }

    #[test]
    fn test_zero_samples_behaves_like_one() {
        let (scene, camera) = edge_scene();
        let context = DisplayContext::new(4, 4);
        let zero = TraceOptions {
            samples_per_axis: 0,
            ..TraceOptions::default()
        };
        let one = TraceOptions {
            samples_per_axis: 1,
            ..TraceOptions::default()
        };

        assert_eq!(
            SceneTracer::new(zero).render(&scene, &camera, context),
            SceneTracer::new(one).render(&scene, &camera, context)
        );
    }

    #[test]
    fn test_render_buffer_matches_context() {
        let (scene, _) = shadow_scene();
        let camera = PerspectiveCamera::new(45.0, 2.0, 0.1, 100.0)
            .looking_at(Vec3::new(0.0, 4.0, 8.0), Vec3::ZERO);
        let pixels = SceneTracer::default().render(&scene, &camera, DisplayContext::new(16, 8));

        assert_eq!(pixels.len(), 16 * 8);
        assert!(pixels.iter().all(|p| p[3] == 255));
    }
}

use approx::assert_relative_eq;
use glam::Vec3;
use tiger_puppet::core::{DisplayContext, PreparedScene, SceneTracer, TraceOptions};
use tiger_puppet::math::{hex_to_linear, Ray};
use tiger_puppet::scene::{MaterialRegistry, SceneGraph};
use tiger_puppet::viewport::ViewportManager;
use tiger_puppet::{build_tiger_scene, TigerRig};

fn setup() -> (SceneGraph, TigerRig) {
    let materials = MaterialRegistry::new();
    let mut scene = SceneGraph::new();
    let rig = build_tiger_scene(&mut scene, &materials);
    (scene, rig)
}

#[cfg(test)]
mod tracer_tests {
    use super::*;

    #[test]
    fn test_frame_covers_display() {
        let (scene, _) = setup();
        let viewport = ViewportManager::new(800);
        let context = DisplayContext::new(80, 40);

        let frame = SceneTracer::default().render(&scene, viewport.camera(), context);
        assert_eq!(frame.len(), context.pixel_count());
    }

    #[test]
    fn test_head_in_frame_black_sky_in_corner() {
        let (scene, _) = setup();
        let viewport = ViewportManager::new(800);
        let frame = SceneTracer::default().render(&scene, viewport.camera(), DisplayContext::new(80, 40));

        assert_eq!(frame[0], [0, 0, 0, 255]);

        // Forehead, between the eyes
        let forehead = frame[17 * 80 + 40];
        // Orange paper: strong red, weak blue
        assert!(forehead[0] > 150);
        assert!(forehead[0] > forehead[2]);
    }

    #[test]
    fn test_forward_ray_hits_head_front() {
        let (scene, rig) = setup();
        let prepared = PreparedScene::from_graph(&scene);

        let hit = prepared.intersect(&Ray::new(Vec3::new(0.0, 0.6, 5.0), Vec3::NEG_Z)).unwrap();
        assert_eq!(hit.node, rig.head);
        assert_relative_eq!(hit.point.z, 0.7, epsilon = 1e-4);
        assert_relative_eq!(hit.normal.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_tongue_joins_render_when_shown() {
        let (mut scene, rig) = setup();
        let hidden = PreparedScene::from_graph(&scene).len();

        scene.node_mut(rig.tongue).visible = true;
        assert_eq!(PreparedScene::from_graph(&scene).len(), hidden + 1);
    }

    #[test]
    fn test_hiding_group_hides_whole_tiger() {
        let (mut scene, rig) = setup();
        scene.node_mut(rig.root).visible = false;
        // Only the stage remains
        assert_eq!(PreparedScene::from_graph(&scene).len(), 1);
    }

    #[test]
    fn test_head_shadows_stage() {
        let (scene, _) = setup();
        let prepared = PreparedScene::from_graph(&scene);

        // Straight down onto the stage where the light ray passes through the head
        let ray = Ray::new(Vec3::new(-0.783, 5.0, -0.779), Vec3::NEG_Y);
        let hit = prepared.intersect(&ray).unwrap();
        assert_relative_eq!(hit.point.y, -1.025, epsilon = 1e-4);

        let shaded = SceneTracer::new(TraceOptions::default()).trace(&prepared, &ray);
        let lit = SceneTracer::new(TraceOptions {
            shadows: false,
            ..TraceOptions::default()
        }).trace(&prepared, &ray);

        let stage = hex_to_linear(0xd5d5d5);
        assert_relative_eq!(shaded.x, stage[0] * 0.8, epsilon = 1e-4);
        assert!(lit.x > shaded.x);
    }

    #[test]
    fn test_render_is_deterministic() {
        let (scene, _) = setup();
        let viewport = ViewportManager::new(800);
        let tracer = SceneTracer::default();
        let context = DisplayContext::new(40, 20);

        assert_eq!(
            tracer.render(&scene, viewport.camera(), context),
            tracer.render(&scene, viewport.camera(), context)
        );
    }
}

use std::f32::consts::PI;

use glam::Vec3;

use crate::scene::{
    Lighting, MaterialRegistry, NodeId, SceneGraph, SceneNode, ShapeDescriptor, ShapeKind, Swatch,
};

/// Whisker dots on the right cheek; the left cheek mirrors them
pub const WHISKER_DOTS: [(f32, f32); 3] = [(0.28, -0.12), (0.34, -0.18), (0.28, -0.24)];
pub const CHEEK_STRIPE_X: f32 = 0.75;
pub const EYE_X: f32 = 0.4;
pub const EAR_X: f32 = 0.65;

/// Handles to the nodes the puppet's controls move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TigerRig {
    pub stage: NodeId,
    /// Whole-tiger group; its yaw is driven by drag and idle spin
    pub root: NodeId,
    pub head: NodeId,
    /// Pivot the jaw swings about
    pub jaw_hinge: NodeId,
    pub jaw: NodeId,
    pub tongue: NodeId,
}

/// Builds the stage and the paper tiger puppet into `scene`
pub fn build_tiger_scene(scene: &mut SceneGraph, materials: &MaterialRegistry) -> TigerRig {
    scene.lighting = Lighting::default();

    let stage = scene.add_root(
        SceneNode::mesh(
            "stage",
            ShapeDescriptor::new(ShapeKind::cylinder(2.0, 0.15, 32), materials.get(Swatch::Stage)),
        )
        .at(Vec3::new(0.0, -1.1, 0.0))
        .receiving_shadow(),
    );

    let root = scene.add_root(SceneNode::group("tiger").at(Vec3::new(0.0, 0.15, 0.2)));

    let head = scene.add_child(
        root,
        SceneNode::mesh("head", paper(ShapeKind::cuboid(1.8, 1.3, 1.0), materials, Swatch::Orange))
            .casting_shadow(),
    );

    build_face(scene, head, materials);

    let jaw_hinge = scene.add_child(
        root,
        SceneNode::group("jaw_hinge").at(Vec3::new(0.0, -0.35, -0.55)),
    );
    let jaw = scene.add_child(
        jaw_hinge,
        SceneNode::mesh("jaw", paper(ShapeKind::cuboid(1.6, 0.5, 0.8), materials, Swatch::Orange))
            .at(Vec3::new(0.0, -0.15, 0.35))
            .casting_shadow(),
    );
    let tongue = scene.add_child(
        jaw,
        SceneNode::mesh("tongue", paper(ShapeKind::cuboid(0.6, 0.12, 0.4), materials, Swatch::Pink))
            .at(Vec3::new(0.0, -0.12, 0.2))
            .hidden(),
    );

    log::debug!("tiger scene built with {} nodes", scene.len());

    TigerRig {
        stage,
        root,
        head,
        jaw_hinge,
        jaw,
        tongue,
    }
}

fn paper(kind: ShapeKind, materials: &MaterialRegistry, swatch: Swatch) -> ShapeDescriptor {
    ShapeDescriptor::new(kind, materials.get(swatch))
}

fn build_face(scene: &mut SceneGraph, head: NodeId, materials: &MaterialRegistry) {
    scene.add_child(
        head,
        SceneNode::mesh("mouth_oval", paper(ShapeKind::sphere(0.45, 24, 16), materials, Swatch::White))
            .at(Vec3::new(0.0, -0.15, 0.51))
            .scaled(Vec3::new(1.0, 1.0, 0.15)),
    );

    scene.add_child(
        head,
        SceneNode::mesh("nose", paper(ShapeKind::cone(0.12, 0.18, 3), materials, Swatch::Black))
            .at(Vec3::new(0.0, -0.05, 0.55))
            .rotated(Vec3::new(PI, 0.0, 0.0)),
    );

    for side in [-1.0, 1.0] {
        for (x, y) in WHISKER_DOTS {
            whisker_dot(scene, head, materials, side * x, y);
        }
    }

    for x in [-CHEEK_STRIPE_X, CHEEK_STRIPE_X] {
        cheek_stripe(scene, head, materials, x);
    }

    for x in [-EYE_X, EYE_X] {
        eye(scene, head, materials, x);
    }

    for x in [-EAR_X, EAR_X] {
        ear(scene, head, materials, x);
    }
}

fn whisker_dot(scene: &mut SceneGraph, head: NodeId, materials: &MaterialRegistry, x: f32, y: f32) {
    scene.add_child(
        head,
        SceneNode::mesh("whisker_dot", paper(ShapeKind::sphere(0.04, 12, 12), materials, Swatch::Black))
            .at(Vec3::new(x, y, 0.55)),
    );
}

fn cheek_stripe(scene: &mut SceneGraph, head: NodeId, materials: &MaterialRegistry, x: f32) {
    scene.add_child(
        head,
        SceneNode::mesh("cheek_stripe", paper(ShapeKind::cuboid(0.08, 0.45, 0.04), materials, Swatch::Black))
            .at(Vec3::new(x, 0.05, 0.5)),
    );
}

fn eye(scene: &mut SceneGraph, head: NodeId, materials: &MaterialRegistry, x: f32) {
    let eye = scene.add_child(
        head,
        SceneNode::mesh("eye", paper(ShapeKind::sphere(0.17, 16, 16), materials, Swatch::White))
            .at(Vec3::new(x, 0.25, 0.6)),
    );
    scene.add_child(
        eye,
        SceneNode::mesh("pupil", paper(ShapeKind::sphere(0.07, 16, 16), materials, Swatch::Black))
            .at(Vec3::new(0.0, 0.0, 0.12)),
    );
}

fn ear(scene: &mut SceneGraph, head: NodeId, materials: &MaterialRegistry, x: f32) {
    scene.add_child(
        head,
        SceneNode::mesh("ear", paper(ShapeKind::cylinder(0.2, 0.12, 16), materials, Swatch::Orange))
            .at(Vec3::new(x, 0.85, 0.1))
            .casting_shadow(),
    );
}

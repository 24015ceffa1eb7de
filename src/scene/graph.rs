use glam::{EulerRot, Mat4, Quat, Vec3};

use super::light::Lighting;
use super::shape::ShapeDescriptor;

/// Handle into a [`SceneGraph`]. Only the graph mints these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Transform node with an optional visual
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: &'static str,
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z
    pub rotation: Vec3,
    pub scale: Vec3,
    pub shape: Option<ShapeDescriptor>,
    /// Hides this node and everything under it
    pub visible: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    /// Empty transform node
    pub fn group(name: &'static str) -> Self {
        Self {
            name,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            shape: None,
            visible: true,
            cast_shadow: false,
            receive_shadow: false,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn mesh(name: &'static str, shape: ShapeDescriptor) -> Self {
        Self {
            shape: Some(shape),
            ..Self::group(name)
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn casting_shadow(mut self) -> Self {
        self.cast_shadow = true;
        self
    }

    pub fn receiving_shadow(mut self) -> Self {
        self.receive_shadow = true;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Scale, then rotate, then translate
    pub fn local_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

/// Visible shaped node with its accumulated world transform
#[derive(Debug, Clone, Copy)]
pub struct WorldItem<'a> {
    pub id: NodeId,
    pub node: &'a SceneNode,
    pub world: Mat4,
}

/// Arena of transform trees. Nodes enter either as a new root or as a fresh
/// child of an existing node, so every tree stays acyclic and each child has
/// exactly one parent.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    roots: Vec<NodeId>,
    pub lighting: Lighting,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, node: SceneNode) -> NodeId {
        let id = self.insert(node, None);
        self.roots.push(id);
        id
    }

    pub fn add_child(&mut self, parent: NodeId, node: SceneNode) -> NodeId {
        let id = self.insert(node, Some(parent));
        self.nodes[parent.0].children.push(id);
        id
    }

    fn insert(&mut self, mut node: SceneNode, parent: Option<NodeId>) -> NodeId {
        node.parent = parent;
        node.children.clear();
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.0]
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes carrying the given name, in insertion order
    pub fn find_all(&self, name: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.name == name)
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.find_all(name).into_iter().next()
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = self.node(id);
        let local = node.local_matrix();
        match node.parent {
            Some(parent) => self.world_matrix(parent) * local,
            None => local,
        }
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).transform_point3(Vec3::ZERO)
    }

    /// True when the node and all of its ancestors are visible
    pub fn is_effectively_visible(&self, id: NodeId) -> bool {
        let node = self.node(id);
        node.visible && node.parent.map_or(true, |parent| self.is_effectively_visible(parent))
    }

    /// Depth-first walk over visible nodes that carry a shape. Hidden
    /// subtrees are skipped entirely.
    pub fn visible_items(&self) -> Vec<WorldItem<'_>> {
        let mut items = Vec::new();
        let mut stack: Vec<(NodeId, Mat4)> = self
            .roots
            .iter()
            .rev()
            .map(|&id| (id, Mat4::IDENTITY))
            .collect();

        while let Some((id, parent_world)) = stack.pop() {
            let node = self.node(id);
            if !node.visible {
                continue;
            }

            let world = parent_world * node.local_matrix();
            if node.shape.is_some() {
                items.push(WorldItem { id, node, world });
            }
            stack.extend(node.children.iter().rev().map(|&child| (child, world)));
        }

        items
    }
}

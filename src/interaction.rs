use crate::core::InputEvent;
use crate::scene::{NodeId, SceneGraph};

/// Radians of yaw per pixel of horizontal drag
pub const DRAG_SENSITIVITY: f32 = 0.01;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DragState {
    pub is_dragging: bool,
    pub last_pointer_x: f32,
}

/// Turns horizontal pointer drags into yaw on a target node
#[derive(Debug, Clone)]
pub struct InteractionHandler {
    target: NodeId,
    sensitivity: f32,
    drag: DragState,
}

impl InteractionHandler {
    pub fn new(target: NodeId) -> Self {
        Self::with_sensitivity(target, DRAG_SENSITIVITY)
    }

    pub fn with_sensitivity(target: NodeId, sensitivity: f32) -> Self {
        Self {
            target,
            sensitivity,
            drag: DragState::default(),
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn pointer_down(&mut self, x: f32) {
        self.drag = DragState {
            is_dragging: true,
            last_pointer_x: x,
        };
    }

    pub fn pointer_up(&mut self) {
        self.drag.is_dragging = false;
    }

    pub fn pointer_move(&mut self, x: f32, scene: &mut SceneGraph) {
        if !self.drag.is_dragging {
            return;
        }

        let delta = x - self.drag.last_pointer_x;
        scene.node_mut(self.target).rotation.y += delta * self.sensitivity;
        self.drag.last_pointer_x = x;
        log::trace!("drag delta {delta} px");
    }

    /// Returns false for events this handler does not consume
    pub fn handle(&mut self, event: &InputEvent, scene: &mut SceneGraph) -> bool {
        match *event {
            InputEvent::PointerDown { x } => self.pointer_down(x),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::PointerMove { x } => self.pointer_move(x, scene),
            InputEvent::Resize { .. } => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneNode;

    fn setup() -> (SceneGraph, NodeId, InteractionHandler) {
        let mut scene = SceneGraph::new();
        let root = scene.add_root(SceneNode::group("root"));
        (scene, root, InteractionHandler::new(root))
    }

    #[test]
    fn test_starts_idle() {
        let (_, _, handler) = setup();
        assert_eq!(handler.drag_state(), DragState::default());
    }

    #[test]
    fn test_pointer_down_records_x() {
        let (_, _, mut handler) = setup();
        handler.pointer_down(42.0);
        assert_eq!(
            handler.drag_state(),
            DragState { is_dragging: true, last_pointer_x: 42.0 }
        );
    }

    #[test]
    fn test_move_without_drag_is_noop() {
        let (mut scene, root, mut handler) = setup();
        handler.pointer_move(300.0, &mut scene);
        assert_eq!(scene.node(root).rotation.y, 0.0);
        assert_eq!(handler.drag_state().last_pointer_x, 0.0);
    }

    #[test]
    fn test_drag_tracks_last_x() {
        let (mut scene, root, mut handler) = setup();
        handler.pointer_down(10.0);
        handler.pointer_move(20.0, &mut scene);
        handler.pointer_move(15.0, &mut scene);

        assert_eq!(handler.drag_state().last_pointer_x, 15.0);
        assert!((scene.node(root).rotation.y - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_handle_ignores_resize() {
        let (mut scene, _, mut handler) = setup();
        assert!(!handler.handle(&InputEvent::Resize { width: 10, height: 10 }, &mut scene));
        assert!(handler.handle(&InputEvent::PointerUp, &mut scene));
    }
}

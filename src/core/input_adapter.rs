use winit::event::{ElementState, MouseButton, WindowEvent};

use super::input_event::InputEvent;

/// Adapter that bridges Winit events to [`InputEvent`]s
#[derive(Debug, Clone, Default)]
pub struct PointerAdapter {
    /// Last cursor position; winit button events carry no coordinates
    cursor: Option<(f32, f32)>,
    /// Left button went down before any cursor motion was seen
    pending_press: bool,
}

impl PointerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(position.x as f32, position.y as f32))
            }
            WindowEvent::MouseInput { state, button, .. } => self.mouse_input(*button, *state),
            WindowEvent::Resized(size) => Some(InputEvent::Resize {
                width: size.width,
                height: size.height,
            }),
            _ => None,
        }
    }

    /// A press still waiting for a position is anchored here
    pub fn cursor_moved(&mut self, x: f32, y: f32) -> InputEvent {
        self.cursor = Some((x, y));
        if std::mem::take(&mut self.pending_press) {
            InputEvent::PointerDown { x }
        } else {
            InputEvent::PointerMove { x }
        }
    }

    /// Only the left button drives the puppet. A press before any cursor
    /// motion is held back and reported on the first move.
    pub fn mouse_input(&mut self, button: MouseButton, state: ElementState) -> Option<InputEvent> {
        if button != MouseButton::Left {
            return None;
        }

        match state {
            ElementState::Pressed => match self.cursor {
                Some((x, _)) => Some(InputEvent::PointerDown { x }),
                None => {
                    self.pending_press = true;
                    None
                }
            },
            ElementState::Released => {
                self.pending_press = false;
                Some(InputEvent::PointerUp)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_uses_last_cursor() {
        let mut adapter = PointerAdapter::new();
        assert_eq!(adapter.cursor_moved(120.0, 30.0), InputEvent::PointerMove { x: 120.0 });
        assert_eq!(
            adapter.mouse_input(MouseButton::Left, ElementState::Pressed),
            Some(InputEvent::PointerDown { x: 120.0 })
        );
    }

    #[test]
    fn test_press_without_cursor_anchors_on_first_move() {
        let mut adapter = PointerAdapter::new();
        assert_eq!(adapter.mouse_input(MouseButton::Left, ElementState::Pressed), None);
        assert_eq!(adapter.cursor_moved(50.0, 5.0), InputEvent::PointerDown { x: 50.0 });
        assert_eq!(adapter.cursor_moved(60.0, 5.0), InputEvent::PointerMove { x: 60.0 });
    }

    #[test]
    fn test_release_cancels_unanchored_press() {
        let mut adapter = PointerAdapter::new();
        adapter.mouse_input(MouseButton::Left, ElementState::Pressed);
        assert_eq!(
            adapter.mouse_input(MouseButton::Left, ElementState::Released),
            Some(InputEvent::PointerUp)
        );
        assert_eq!(adapter.cursor_moved(50.0, 5.0), InputEvent::PointerMove { x: 50.0 });
    }

    #[test]
    fn test_release_always_reported() {
        let mut adapter = PointerAdapter::new();
        assert_eq!(
            adapter.mouse_input(MouseButton::Left, ElementState::Released),
            Some(InputEvent::PointerUp)
        );
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut adapter = PointerAdapter::new();
        adapter.cursor_moved(1.0, 1.0);
        assert_eq!(adapter.mouse_input(MouseButton::Right, ElementState::Pressed), None);
        assert_eq!(adapter.mouse_input(MouseButton::Middle, ElementState::Released), None);
    }
}

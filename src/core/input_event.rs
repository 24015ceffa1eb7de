/// Host input, reduced to what the puppet reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the surface at horizontal position `x`
    PointerDown { x: f32 },
    /// Primary button released anywhere
    PointerUp,
    PointerMove { x: f32 },
    /// New window inner size in physical pixels
    Resize { width: u32, height: u32 },
}

/// Pixel dimensions of a frame the tracer produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayContext {
    pub width: u32,
    pub height: u32,
}

impl DisplayContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Divide both sides by `scale`, never dropping below one pixel
    pub fn scaled_down(&self, scale: u32) -> Self {
        let scale = scale.max(1);
        Self {
            width: (self.width / scale).max(1),
            height: (self.height / scale).max(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

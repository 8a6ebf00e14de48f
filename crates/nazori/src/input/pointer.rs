use glam::Vec2;

use crate::api::types::CanvasSize;

/// On-page bounding box of a canvas element, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Map a client-space pointer position into canvas logical space.
    /// A collapsed rect only removes the offset.
    pub fn to_canvas(&self, client: Vec2, canvas: CanvasSize) -> Vec2 {
        let local = client - Vec2::new(self.left, self.top);
        if self.width <= 0.0 || self.height <= 0.0 {
            return local;
        }
        local * Vec2::new(canvas.width / self.width, canvas.height / self.height)
    }
}

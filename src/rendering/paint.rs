/// Paint commands and the canvas drawables paint into
use serde::{Deserialize, Serialize};

use crate::rendering::{Bounds, Color, PixelBuffer};

/// A single opaque drawing operation. Coordinates are in the drawable's
/// intrinsic space; see `CommandDrawable` for how they map onto bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PaintCommand {
    /// Cover the whole drawable
    Fill { color: Color },
    SolidRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    },
    Pixel { x: i32, y: i32, color: Color },
}

/// Paint target handed to a `Renderable`.
///
/// Writes replace pixels outright (no blending) and anything outside the
/// underlying buffer is clipped.
pub struct Canvas<'a> {
    buffer: &'a mut PixelBuffer,
}

impl<'a> Canvas<'a> {
    pub fn new(buffer: &'a mut PixelBuffer) -> Self {
        Self { buffer }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn clear(&mut self, color: Color) {
        self.buffer.fill(color);
    }

    pub fn fill_rect(&mut self, rect: Bounds, color: Color) {
        self.buffer.fill_rect(rect, color);
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.buffer.set_pixel(x, y, color);
    }
}

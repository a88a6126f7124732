//! Renderable drawables
//!
//! A [`Renderable`] reports an intrinsic size, accepts paint bounds and paints
//! itself onto a [`Canvas`]. Two stock implementations are provided:
//! [`ColorDrawable`] for solid fills and [`CommandDrawable`] for replaying a
//! list of [`PaintCommand`]s scaled to whatever bounds it is given.

use crate::rendering::{Bounds, Canvas, Color, PaintCommand, PixelBuffer};
use crate::{Error, Result};

/// Something that can paint itself into a pixel buffer.
pub trait Renderable {
    /// Natural width in pixels; non-positive means "no intrinsic width".
    fn intrinsic_width(&self) -> i32;

    /// Natural height in pixels; non-positive means "no intrinsic height".
    fn intrinsic_height(&self) -> i32;

    fn set_bounds(&mut self, bounds: Bounds);

    fn bounds(&self) -> Bounds;

    /// Paint within the current bounds. Errors are surfaced to the caller as-is.
    fn paint(&self, canvas: &mut Canvas<'_>) -> Result<()>;
}

/// Fills its bounds with a single color.
#[derive(Debug, Clone)]
pub struct ColorDrawable {
    color: Color,
    intrinsic_width: i32,
    intrinsic_height: i32,
    bounds: Bounds,
}

impl ColorDrawable {
    /// A drawable without intrinsic size (-1 x -1), like a plain color fill.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            intrinsic_width: -1,
            intrinsic_height: -1,
            bounds: Bounds::default(),
        }
    }

    pub fn with_size(color: Color, width: i32, height: i32) -> Self {
        Self {
            intrinsic_width: width,
            intrinsic_height: height,
            ..Self::new(color)
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

impl Renderable for ColorDrawable {
    fn intrinsic_width(&self) -> i32 {
        self.intrinsic_width
    }

    fn intrinsic_height(&self) -> i32 {
        self.intrinsic_height
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn paint(&self, canvas: &mut Canvas<'_>) -> Result<()> {
        canvas.fill_rect(self.bounds, self.color);
        Ok(())
    }
}

/// Replays paint commands authored against the intrinsic size, scaling them
/// to the current bounds. Output is clipped to the bounds.
#[derive(Debug, Clone)]
pub struct CommandDrawable {
    width: i32,
    height: i32,
    commands: Vec<PaintCommand>,
    bounds: Bounds,
}

impl CommandDrawable {
    pub fn new(width: i32, height: i32, commands: Vec<PaintCommand>) -> Self {
        Self {
            width,
            height,
            commands,
            bounds: Bounds::default(),
        }
    }

    pub fn push(&mut self, command: PaintCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Map an intrinsic-space rectangle onto the bounds.
    fn map_rect(&self, x: i32, y: i32, w: i64, h: i64) -> Bounds {
        let b = self.bounds;
        let scale = |v: i64, origin: i32, extent: i32, intrinsic: i32| -> i32 {
            let scaled = if intrinsic > 0 {
                v.saturating_mul(extent as i64).div_euclid(intrinsic as i64)
            } else {
                v
            };
            (origin as i64)
                .saturating_add(scaled)
                .clamp(i32::MIN as i64, i32::MAX as i64) as i32
        };
        Bounds {
            left: scale(x as i64, b.left, b.width(), self.width),
            top: scale(y as i64, b.top, b.height(), self.height),
            right: scale(x as i64 + w, b.left, b.width(), self.width),
            bottom: scale(y as i64 + h, b.top, b.height(), self.height),
        }
    }
}

impl Renderable for CommandDrawable {
    fn intrinsic_width(&self) -> i32 {
        self.width
    }

    fn intrinsic_height(&self) -> i32 {
        self.height
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn paint(&self, canvas: &mut Canvas<'_>) -> Result<()> {
        for cmd in &self.commands {
            let (rect, color) = match *cmd {
                PaintCommand::Fill { color } => (self.bounds, color),
                PaintCommand::SolidRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => (self.map_rect(x, y, width as i64, height as i64), color),
                PaintCommand::Pixel { x, y, color } => (self.map_rect(x, y, 1, 1), color),
            };
            if let Some(clipped) = rect.intersect(&self.bounds) {
                canvas.fill_rect(clipped, color);
            }
        }
        Ok(())
    }
}

/// Set bounds to `(0, 0, width, height)` and paint into a fresh buffer.
pub fn rasterize(renderable: &mut dyn Renderable, width: u32, height: u32) -> Result<PixelBuffer> {
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(Error::invalid_dimensions(width, height));
    }
    let mut buffer = PixelBuffer::new(width, height);
    renderable.set_bounds(Bounds::from_size(width as i32, height as i32));
    renderable.paint(&mut Canvas::new(&mut buffer))?;
    Ok(buffer)
}

//! Rendering primitives: colors, bounds, paint commands and pixel buffers

pub mod color;
pub mod layout;
pub mod paint;
pub mod raster;

pub use color::Color;
pub use layout::Bounds;
pub use paint::{Canvas, PaintCommand};
pub use raster::{HeapAllocator, PixelBuffer, PooledAllocator, ScopedBuffer, SurfaceAllocator};

//! drawcheck
//!
//! Test helpers that render a drawable into an offscreen pixel buffer and
//! assert that every pixel is one expected color.
//!
//! # Features
//!
//! - **Two reporting modes**: raise a `ColorMismatch` error or record the
//!   failure on a [`FailureReporter`] and keep going
//! - **Scoped buffers**: the offscreen buffer goes back to its
//!   [`SurfaceAllocator`] on every exit path
//! - **Scenes**: JSON paint-command fixtures for drawables authored outside Rust
//!
//! # Example
//!
//! ```
//! use drawcheck::{Color, CommandDrawable, PaintCommand};
//!
//! let mut drawable = CommandDrawable::new(
//!     4,
//!     4,
//!     vec![
//!         PaintCommand::Fill { color: Color::RED },
//!         PaintCommand::Pixel { x: 3, y: 2, color: Color::GREEN },
//!     ],
//! );
//!
//! let err = drawcheck::check_all_same_color("tint", &mut drawable, 4, 4, Color::RED)
//!     .unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "tint: expected all drawable colors to be [255,0,0] but at position (2,3) found [0,255,0]"
//! );
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod assert;
pub mod drawable;
pub mod rendering;
pub mod report;
pub mod scene;

pub use assert::{
    assert_all_same_color, check_all_same_color, AsserterConfig, MismatchMode, MismatchReport,
    PixelColorAsserter,
};
pub use drawable::{rasterize, ColorDrawable, CommandDrawable, Renderable};
pub use rendering::{
    Bounds, Canvas, Color, HeapAllocator, PaintCommand, PixelBuffer, PooledAllocator,
    SurfaceAllocator,
};
pub use report::{FailureReporter, PanickingReporter, RecordingReporter};
pub use scene::Scene;

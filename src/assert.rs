//! Solid-color assertions over rendered drawables
//!
//! [`PixelColorAsserter`] renders a [`Renderable`] into an offscreen buffer and
//! checks that every pixel equals one expected color. Only the first
//! mismatch in row-major scan order is reported.
//!
//! # Example
//!
//! ```
//! use drawcheck::{AsserterConfig, Color, ColorDrawable, PixelColorAsserter, RecordingReporter};
//!
//! let asserter = PixelColorAsserter::new(AsserterConfig::default());
//! let mut drawable = ColorDrawable::with_size(Color::RED, 4, 4);
//! let mut reporter = RecordingReporter::new();
//! asserter
//!     .assert_all_same_color("red fill", &mut drawable, Color::RED, &mut reporter)
//!     .unwrap();
//! reporter.assert_clean();
//! ```

use std::fmt;

use log::{debug, warn};

use crate::drawable::Renderable;
use crate::report::{FailureReporter, PanickingReporter};
use crate::rendering::{Bounds, Canvas, Color, HeapAllocator, ScopedBuffer, SurfaceAllocator};
use crate::{Error, Result};

/// How a color mismatch is surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MismatchMode {
    /// Return `Error::ColorMismatch`
    Raise,
    /// Hand the description to the `FailureReporter` and return `Ok(())`
    #[default]
    Record,
}

/// Description of the first pixel that didn't match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchReport {
    pub prefix: String,
    pub expected: Color,
    pub actual: Color,
    pub row: u32,
    pub column: u32,
}

// Alpha takes part in the comparison but is left out of the message.
impl fmt::Display for MismatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected all drawable colors to be [{},{},{}] \
             but at position ({},{}) found [{},{},{}]",
            self.prefix,
            self.expected.red(),
            self.expected.green(),
            self.expected.blue(),
            self.row,
            self.column,
            self.actual.red(),
            self.actual.green(),
            self.actual.blue(),
        )
    }
}

/// Asserter configuration
///
/// ```
/// let cfg = drawcheck::AsserterConfig::default();
/// assert_eq!(cfg.max_dimension, 16384);
/// ```
#[derive(Debug, Clone)]
pub struct AsserterConfig {
    /// Largest width or height accepted; bigger requests fail with
    /// `InvalidDimensions` before anything is allocated
    pub max_dimension: u32,
    /// Log passing checks at debug level
    pub log_success: bool,
}

impl Default for AsserterConfig {
    fn default() -> Self {
        Self {
            max_dimension: 16384,
            log_success: false,
        }
    }
}

/// Renders drawables and compares every pixel against an expected color.
#[derive(Debug)]
pub struct PixelColorAsserter<A: SurfaceAllocator = HeapAllocator> {
    config: AsserterConfig,
    allocator: A,
}

impl PixelColorAsserter {
    pub fn new(config: AsserterConfig) -> Self {
        Self::with_allocator(config, HeapAllocator)
    }
}

impl Default for PixelColorAsserter {
    fn default() -> Self {
        Self::new(AsserterConfig::default())
    }
}

impl<A: SurfaceAllocator> PixelColorAsserter<A> {
    pub fn with_allocator(config: AsserterConfig, allocator: A) -> Self {
        Self { config, allocator }
    }

    pub fn config(&self) -> &AsserterConfig {
        &self.config
    }

    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Check the drawable at its intrinsic size, recording any mismatch on
    /// `reporter`.
    ///
    /// Fails with `InvalidDimensions` without painting when either intrinsic
    /// dimension is non-positive.
    pub fn assert_all_same_color(
        &self,
        prefix: &str,
        renderable: &mut dyn Renderable,
        color: Color,
        reporter: &mut dyn FailureReporter,
    ) -> Result<()> {
        let width = renderable.intrinsic_width();
        let height = renderable.intrinsic_height();
        if width <= 0 || height <= 0 {
            return Err(Error::invalid_dimensions(width, height));
        }
        self.assert_all_same_color_sized(
            prefix,
            renderable,
            width,
            height,
            color,
            MismatchMode::Record,
            reporter,
        )
    }

    /// Check the drawable rendered at `width` x `height`.
    ///
    /// With `MismatchMode::Raise` a mismatch comes back as
    /// `Error::ColorMismatch` and `reporter` is not used; with
    /// `MismatchMode::Record` it goes to `reporter` and the call returns
    /// `Ok(())`. Render errors are returned unchanged in both modes.
    #[allow(clippy::too_many_arguments)]
    pub fn assert_all_same_color_sized(
        &self,
        prefix: &str,
        renderable: &mut dyn Renderable,
        width: i32,
        height: i32,
        color: Color,
        mode: MismatchMode,
        reporter: &mut dyn FailureReporter,
    ) -> Result<()> {
        let mismatch = self.find_first_mismatch(prefix, renderable, width, height, color)?;
        let Some(report) = mismatch else {
            return Ok(());
        };
        match mode {
            MismatchMode::Raise => Err(Error::ColorMismatch(Box::new(report))),
            MismatchMode::Record => {
                reporter.report_failure(&report.to_string());
                Ok(())
            }
        }
    }

    /// Like [`assert_all_same_color_sized`](Self::assert_all_same_color_sized)
    /// in `Raise` mode.
    pub fn check_all_same_color(
        &self,
        prefix: &str,
        renderable: &mut dyn Renderable,
        width: i32,
        height: i32,
        color: Color,
    ) -> Result<()> {
        match self.find_first_mismatch(prefix, renderable, width, height, color)? {
            Some(report) => Err(Error::ColorMismatch(Box::new(report))),
            None => Ok(()),
        }
    }

    /// Render into a scoped buffer and scan rows top to bottom, columns left
    /// to right, stopping at the first pixel that differs from `color`.
    pub fn find_first_mismatch(
        &self,
        prefix: &str,
        renderable: &mut dyn Renderable,
        width: i32,
        height: i32,
        color: Color,
    ) -> Result<Option<MismatchReport>> {
        let (w, h) = self.checked_size(width, height)?;
        debug!("{}: checking {}x{} render against {}", prefix, w, h, color);

        let mut buffer = ScopedBuffer::allocate(&self.allocator, w, h)?;
        renderable.set_bounds(Bounds::from_size(width, height));
        renderable.paint(&mut Canvas::new(&mut buffer))?;

        for row in 0..h {
            let pixels = buffer.row(row);
            if let Some(column) = pixels.iter().position(|&px| px != color) {
                let report = MismatchReport {
                    prefix: prefix.to_string(),
                    expected: color,
                    actual: pixels[column],
                    row,
                    column: column as u32,
                };
                warn!("{}", report);
                return Ok(Some(report));
            }
        }

        if self.config.log_success {
            debug!("{}: all {} pixels are {}", prefix, w as u64 * h as u64, color);
        }
        Ok(None)
    }

    fn checked_size(&self, width: i32, height: i32) -> Result<(u32, u32)> {
        let max = self.config.max_dimension;
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 && w <= max && h <= max => Ok((w, h)),
            _ => Err(Error::invalid_dimensions(width, height)),
        }
    }
}

/// Check at intrinsic size with the default asserter; a mismatch panics.
#[track_caller]
pub fn assert_all_same_color(
    prefix: &str,
    renderable: &mut dyn Renderable,
    color: Color,
) -> Result<()> {
    PixelColorAsserter::new(AsserterConfig::default()).assert_all_same_color(
        prefix,
        renderable,
        color,
        &mut PanickingReporter,
    )
}

/// Check at an explicit size with the default asserter; a mismatch is
/// returned as `Error::ColorMismatch`.
pub fn check_all_same_color(
    prefix: &str,
    renderable: &mut dyn Renderable,
    width: i32,
    height: i32,
    color: Color,
) -> Result<()> {
    PixelColorAsserter::new(AsserterConfig::default())
        .check_all_same_color(prefix, renderable, width, height, color)
}

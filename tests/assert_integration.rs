//! Integration tests for the pixel color asserter

use std::cell::Cell;

use drawcheck::{
    AsserterConfig, Bounds, Canvas, Color, Error, FailureReporter, MismatchMode, PanickingReporter,
    PixelColorAsserter, PooledAllocator, RecordingReporter, Renderable,
};

/// Renderable that fills with one color, overrides chosen pixels, and
/// counts how often it was painted.
struct SpyDrawable {
    width: i32,
    height: i32,
    fill: Color,
    overrides: Vec<(i32, i32, Color)>,
    bounds: Bounds,
    paints: Cell<usize>,
    fail_with: Option<String>,
}

impl SpyDrawable {
    fn new(width: i32, height: i32, fill: Color) -> Self {
        Self {
            width,
            height,
            fill,
            overrides: Vec::new(),
            bounds: Bounds::default(),
            paints: Cell::new(0),
            fail_with: None,
        }
    }

    /// `row`, `column` in buffer coordinates
    fn with_pixel(mut self, row: i32, column: i32, color: Color) -> Self {
        self.overrides.push((column, row, color));
        self
    }

    fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }
}

impl Renderable for SpyDrawable {
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

    fn paint(&self, canvas: &mut Canvas<'_>) -> drawcheck::Result<()> {
        self.paints.set(self.paints.get() + 1);
        if let Some(msg) = &self.fail_with {
            return Err(Error::RenderError(msg.clone()));
        }
        canvas.fill_rect(self.bounds, self.fill);
        for &(x, y, color) in &self.overrides {
            canvas.set_pixel(x, y, color);
        }
        Ok(())
    }
}

fn pooled() -> PixelColorAsserter<PooledAllocator> {
    PixelColorAsserter::with_allocator(AsserterConfig::default(), PooledAllocator::new())
}

#[test]
fn uniform_red_passes_in_both_modes() {
    let asserter = pooled();
    let mut d = SpyDrawable::new(4, 4, Color::RED);
    let mut reporter = RecordingReporter::new();

    asserter
        .assert_all_same_color("uniform", &mut d, Color::RED, &mut reporter)
        .unwrap();
    asserter
        .assert_all_same_color_sized(
            "uniform",
            &mut d,
            4,
            4,
            Color::RED,
            MismatchMode::Raise,
            &mut reporter,
        )
        .unwrap();

    reporter.assert_clean();
    assert_eq!(d.bounds(), Bounds::from_size(4, 4));
    assert_eq!(d.paints.get(), 2);
    assert_eq!(asserter.allocator().outstanding(), 0);
}

#[test]
fn single_green_pixel_is_reported_at_row_2_column_3() {
    let asserter = pooled();
    let mut d = SpyDrawable::new(4, 4, Color::RED).with_pixel(2, 3, Color::GREEN);
    let mut reporter = RecordingReporter::new();

    asserter
        .assert_all_same_color("scenario", &mut d, Color::RED, &mut reporter)
        .unwrap();

    assert_eq!(
        reporter.failures(),
        &["scenario: expected all drawable colors to be [255,0,0] \
           but at position (2,3) found [0,255,0]"
            .to_string()]
    );
    assert_eq!(asserter.allocator().outstanding(), 0);
}

#[test]
fn earlier_row_wins_over_earlier_column() {
    let asserter = pooled();
    let mut d = SpyDrawable::new(5, 5, Color::WHITE)
        .with_pixel(3, 0, Color::BLACK)
        .with_pixel(1, 4, Color::BLUE);

    let report = asserter
        .find_first_mismatch("order", &mut d, 5, 5, Color::WHITE)
        .unwrap()
        .expect("mismatch");
    assert_eq!((report.row, report.column), (1, 4));
    assert_eq!(report.actual, Color::BLUE);
}

#[test]
fn earlier_column_wins_within_a_row() {
    let asserter = pooled();
    let mut d = SpyDrawable::new(5, 5, Color::WHITE)
        .with_pixel(2, 4, Color::BLACK)
        .with_pixel(2, 1, Color::BLUE);

    let report = asserter
        .find_first_mismatch("order", &mut d, 5, 5, Color::WHITE)
        .unwrap()
        .expect("mismatch");
    assert_eq!((report.row, report.column), (2, 1));
}

#[test]
fn report_channels_decompose_expected_and_actual() {
    let asserter = pooled();
    let expected = Color::from_argb(0xFF12_3456);
    let actual = Color::from_argb(0xFFAB_CDEF);
    let mut d = SpyDrawable::new(2, 2, expected).with_pixel(1, 1, actual);

    let err = asserter
        .check_all_same_color("chan", &mut d, 2, 2, expected)
        .unwrap_err();
    let report = err.mismatch().expect("mismatch");
    assert_eq!(report.expected, expected);
    assert_eq!(report.actual, actual);
    assert_eq!(
        err.to_string(),
        "chan: expected all drawable colors to be [18,52,86] \
         but at position (1,1) found [171,205,239]"
    );
}

#[test]
fn zero_width_never_paints() {
    let asserter = pooled();
    let mut d = SpyDrawable::new(0, 4, Color::RED);
    let mut reporter = RecordingReporter::new();

    let err = asserter
        .assert_all_same_color("empty", &mut d, Color::RED, &mut reporter)
        .unwrap_err();

    assert!(matches!(err, Error::InvalidDimensions { width: 0, height: 4 }));
    assert_eq!(d.paints.get(), 0);
    assert_eq!(asserter.allocator().allocated(), 0);
    assert!(reporter.is_clean());
}

#[test]
fn negative_height_never_paints() {
    let asserter = pooled();
    let mut d = SpyDrawable::new(4, -1, Color::RED);
    let mut reporter = RecordingReporter::new();

    let err = asserter
        .assert_all_same_color("neg", &mut d, Color::RED, &mut reporter)
        .unwrap_err();

    assert!(matches!(err, Error::InvalidDimensions { .. }));
    assert_eq!(d.paints.get(), 0);
}

#[test]
fn explicit_size_overrides_intrinsic() {
    let asserter = pooled();
    // No intrinsic size at all, but an explicit one is fine
    let mut d = SpyDrawable::new(-1, -1, Color::GREEN);
    asserter
        .check_all_same_color("explicit", &mut d, 7, 3, Color::GREEN)
        .unwrap();
    assert_eq!(d.bounds(), Bounds::from_size(7, 3));
}

#[test]
fn render_error_propagates_and_releases_buffer() {
    let asserter = pooled();
    let mut d = SpyDrawable::new(4, 4, Color::RED).failing("gpu lost");
    let mut reporter = RecordingReporter::new();

    for mode in [MismatchMode::Raise, MismatchMode::Record] {
        let err = asserter
            .assert_all_same_color_sized("render", &mut d, 4, 4, Color::RED, mode, &mut reporter)
            .unwrap_err();
        assert!(matches!(&err, Error::RenderError(msg) if msg == "gpu lost"));
    }

    assert!(reporter.is_clean());
    assert_eq!(asserter.allocator().allocated(), 2);
    assert_eq!(asserter.allocator().outstanding(), 0);
}

#[test]
fn raise_mode_leaves_reporter_untouched() {
    let asserter = pooled();
    let mut d = SpyDrawable::new(3, 3, Color::RED).with_pixel(0, 0, Color::BLACK);
    let mut reporter = RecordingReporter::new();

    let err = asserter
        .assert_all_same_color_sized(
            "raise",
            &mut d,
            3,
            3,
            Color::RED,
            MismatchMode::Raise,
            &mut reporter,
        )
        .unwrap_err();

    assert!(matches!(err, Error::ColorMismatch(_)));
    assert!(reporter.is_clean());
    assert_eq!(asserter.allocator().outstanding(), 0);
}

#[test]
fn record_mode_keeps_going_across_checks() {
    let asserter = pooled();
    let mut reporter = RecordingReporter::new();
    let mut first = SpyDrawable::new(2, 2, Color::RED).with_pixel(1, 0, Color::BLUE);
    let mut second = SpyDrawable::new(2, 2, Color::RED);
    let mut third = SpyDrawable::new(2, 2, Color::RED).with_pixel(0, 1, Color::WHITE);

    for (name, d) in [("first", &mut first), ("second", &mut second), ("third", &mut third)] {
        asserter
            .assert_all_same_color(name, d, Color::RED, &mut reporter)
            .unwrap();
    }

    assert_eq!(reporter.failures().len(), 2);
    assert!(reporter.failures()[0].starts_with("first:"));
    assert!(reporter.failures()[1].starts_with("third:"));
    // Buffers were recycled rather than reallocated
    assert_eq!(asserter.allocator().pooled(), 1);
}

struct CountingReporter(usize);

impl FailureReporter for CountingReporter {
    fn report_failure(&mut self, _message: &str) {
        self.0 += 1;
    }
}

#[test]
fn only_first_mismatch_is_reported() {
    let asserter = pooled();
    let mut d = SpyDrawable::new(4, 4, Color::BLACK);
    let mut reporter = CountingReporter(0);

    asserter
        .assert_all_same_color("all wrong", &mut d, Color::WHITE, &mut reporter)
        .unwrap();
    assert_eq!(reporter.0, 1);
}

#[test]
fn panicking_reporter_still_releases_buffer() {
    let asserter = pooled();
    let mut d = SpyDrawable::new(2, 2, Color::RED).with_pixel(1, 1, Color::GREEN);

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        asserter
            .assert_all_same_color("panics", &mut d, Color::RED, &mut PanickingReporter)
            .ok();
    }));

    assert!(result.is_err());
    assert_eq!(asserter.allocator().outstanding(), 0);
}

#[test]
fn free_functions_use_default_asserter() {
    let mut d = SpyDrawable::new(3, 2, Color::BLUE);
    drawcheck::assert_all_same_color("free", &mut d, Color::BLUE).unwrap();
    drawcheck::check_all_same_color("free", &mut d, 6, 4, Color::BLUE).unwrap();

    let mut bad = SpyDrawable::new(3, 2, Color::BLUE).with_pixel(1, 2, Color::RED);
    let err = drawcheck::check_all_same_color("free", &mut bad, 3, 2, Color::BLUE).unwrap_err();
    assert_eq!(err.mismatch().map(|r| (r.row, r.column)), Some((1, 2)));
}

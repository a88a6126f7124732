//! Failure reporting for non-raising checks

/// Receives assertion failures. Implementations decide whether a failure
/// aborts the test immediately or is collected for later.
pub trait FailureReporter {
    fn report_failure(&mut self, message: &str);
}

/// Collects failure messages and returns normally; check them with
/// [`RecordingReporter::assert_clean`] at the end of the test.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    failures: Vec<String>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Panics listing every recorded failure, if there were any.
    #[track_caller]
    pub fn assert_clean(&self) {
        if !self.failures.is_empty() {
            panic!(
                "{} failure(s) recorded:\n{}",
                self.failures.len(),
                self.failures.join("\n")
            );
        }
    }
}

impl FailureReporter for RecordingReporter {
    fn report_failure(&mut self, message: &str) {
        self.failures.push(message.to_string());
    }
}

/// Fails the current test on the spot by panicking with the message.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanickingReporter;

impl FailureReporter for PanickingReporter {
    fn report_failure(&mut self, message: &str) {
        panic!("{}", message);
    }
}

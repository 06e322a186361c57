use crate::domain::ports::ProgressReporter;

/// Scoped use of a progress reporter. The reporter is released when the
/// scope is dropped, whatever way the import ends.
pub struct ProgressScope<'a> {
    reporter: &'a dyn ProgressReporter,
}

impl<'a> ProgressScope<'a> {
    pub fn acquire(reporter: &'a dyn ProgressReporter, total: usize, label: &str) -> Self {
        reporter.initialize(total, label);
        Self { reporter }
    }

    pub fn increment(&self) {
        self.reporter.increment_progress();
    }
}

impl Drop for ProgressScope<'_> {
    fn drop(&mut self) {
        self.reporter.release();
    }
}

use crate::domain::ports::ProgressReporter;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// 透過 `tracing` 回報進度
#[derive(Debug, Default)]
pub struct TracingProgress {
    total: AtomicUsize,
    done: AtomicUsize,
    label: Mutex<String>,
}

impl TracingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn done(&self) -> usize {
        self.done.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    fn label(&self) -> String {
        self.label
            .lock()
            .map(|label| label.clone())
            .unwrap_or_default()
    }
}

impl ProgressReporter for TracingProgress {
    fn initialize(&self, total: usize, label: &str) {
        self.total.store(total, Ordering::SeqCst);
        self.done.store(0, Ordering::SeqCst);
        if let Ok(mut current) = self.label.lock() {
            *current = label.to_string();
        }
        tracing::info!("{} (0/{})", label, total);
    }

    fn increment_progress(&self) {
        let done = self.done.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!("{} ({}/{})", self.label(), done, self.total());
    }

    fn release(&self) {
        tracing::debug!("{} finished after {} of {} files", self.label(), self.done(), self.total());
    }
}

/// 忽略所有進度更新
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn initialize(&self, _total: usize, _label: &str) {}

    fn increment_progress(&self) {}

    fn release(&self) {}
}

//! Observability handles for dataset loading.
//!
//! Loads report progress through an injected [`LoadObserver`] rather
//! than process-wide instruments, so callers choose where the telemetry
//! goes and tests can assert on it.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Telemetry sink for one or more load operations.
///
/// Implementations must be cheap to call: the loader invokes
/// `record_loaded` once per parsed record on the hot path.
pub trait LoadObserver: Send + Sync {
    /// Called once per successfully parsed record.
    fn record_loaded(&self);

    /// Called once per malformed line that was skipped.
    fn record_skipped(&self, line_number: usize, raw: &str);

    /// Called when a load aborts with a fatal error.
    fn load_failed(&self, path: &Path, message: &str);
}

/// Default observer emitting `tracing` events.
///
/// Counter events carry the `monotonic_counter.` field prefix so a
/// metrics layer can export them as counters.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl LoadObserver for TracingObserver {
    fn record_loaded(&self) {
        tracing::trace!(monotonic_counter.dataset_records_loaded = 1u64, "dataset record loaded");
    }

    fn record_skipped(&self, line_number: usize, raw: &str) {
        tracing::trace!(
            monotonic_counter.dataset_records_skipped = 1u64,
            line_number,
            raw = raw.trim(),
            "dataset record skipped"
        );
    }

    fn load_failed(&self, path: &Path, message: &str) {
        tracing::trace!(
            monotonic_counter.dataset_loads_failed = 1u64,
            path = %path.display(),
            message,
            "dataset load failed"
        );
    }
}

/// Observer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl LoadObserver for NullObserver {
    fn record_loaded(&self) {}

    fn record_skipped(&self, _line_number: usize, _raw: &str) {}

    fn load_failed(&self, _path: &Path, _message: &str) {}
}

/// Observer keeping in-process counts.
///
/// Used by the CLI for end-of-run summaries and by tests to assert on
/// load telemetry.
#[derive(Debug, Default)]
pub struct CountingObserver {
    loaded: AtomicUsize,
    skipped: AtomicUsize,
    failed: AtomicUsize,
}

impl CountingObserver {
    /// Create a new observer with zeroed counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records successfully parsed so far.
    pub fn loaded(&self) -> usize {
        self.loaded.load(Ordering::Relaxed)
    }

    /// Malformed lines skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::Relaxed)
    }

    /// Fatal load failures so far.
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }
}

impl LoadObserver for CountingObserver {
    fn record_loaded(&self) {
        self.loaded.fetch_add(1, Ordering::Relaxed);
    }

    fn record_skipped(&self, _line_number: usize, _raw: &str) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    fn load_failed(&self, _path: &Path, _message: &str) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }
}

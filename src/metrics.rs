// Render metrics module
//
// Lightweight counters for how often the catalog re-renders and how often
// reconciliation was able to skip work

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Process-wide render metrics
///
/// Uses atomic operations so a shared `Arc<Metrics>` can be read from the
/// shutdown path while the controller keeps recording.
#[derive(Debug)]
pub struct Metrics {
    /// Periodic sync ticks handled
    pub sync_ticks: AtomicU64,

    /// Store change notifications reconciled
    pub store_reconciles: AtomicU64,

    /// Grid or category renders that replaced page content
    pub renders: AtomicU64,

    /// Grid or category renders skipped because nothing changed
    pub renders_skipped: AtomicU64,

    /// Full carousel rebuilds
    pub carousel_rebuilds: AtomicU64,

    /// Carousel builds skipped by cool-down or change detection
    pub carousel_skips: AtomicU64,

    /// Downloads recorded
    pub downloads_recorded: AtomicU64,

    /// Render steps skipped because a page element was missing
    pub missing_elements: AtomicU64,

    /// Store read or write failures
    pub store_errors: AtomicU64,

    /// Process start time
    start_time: Instant,
}

impl Metrics {
    /// Create a new Metrics instance
    pub fn new() -> Self {
        Self {
            sync_ticks: AtomicU64::new(0),
            store_reconciles: AtomicU64::new(0),
            renders: AtomicU64::new(0),
            renders_skipped: AtomicU64::new(0),
            carousel_rebuilds: AtomicU64::new(0),
            carousel_skips: AtomicU64::new(0),
            downloads_recorded: AtomicU64::new(0),
            missing_elements: AtomicU64::new(0),
            store_errors: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_sync_tick(&self) {
        self.sync_ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_reconcile(&self) {
        self.store_reconciles.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a render that either replaced content or was skipped
    pub fn record_render(&self, changed: bool) {
        if changed {
            self.renders.fetch_add(1, Ordering::Relaxed);
        } else {
            self.renders_skipped.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a carousel build that either rebuilt slides or was skipped
    pub fn record_carousel_build(&self, rebuilt: bool) {
        if rebuilt {
            self.carousel_rebuilds.fetch_add(1, Ordering::Relaxed);
        } else {
            self.carousel_skips.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_download(&self) {
        self.downloads_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_missing_element(&self) {
        self.missing_elements.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_error(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Share of renders that were skipped as unchanged, from 0.0 to 1.0
    pub fn render_skip_ratio(&self) -> f64 {
        let done = self.renders.load(Ordering::Relaxed);
        let skipped = self.renders_skipped.load(Ordering::Relaxed);
        let total = done + skipped;
        if total > 0 {
            skipped as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Render Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Sync ticks: {}, store reconciles: {}",
            self.sync_ticks.load(Ordering::Relaxed),
            self.store_reconciles.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Renders: {} applied, {} skipped ({:.0}% skipped)",
            self.renders.load(Ordering::Relaxed),
            self.renders_skipped.load(Ordering::Relaxed),
            self.render_skip_ratio() * 100.0
        );
        tracing::info!(
            "Carousel: {} rebuilds, {} skips",
            self.carousel_rebuilds.load(Ordering::Relaxed),
            self.carousel_skips.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Downloads: {}, missing elements: {}, store errors: {}",
            self.downloads_recorded.load(Ordering::Relaxed),
            self.missing_elements.load(Ordering::Relaxed),
            self.store_errors.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

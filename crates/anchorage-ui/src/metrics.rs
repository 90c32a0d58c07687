//! Performance metrics and instrumentation for the UI manager.

use std::time::{Duration, Instant};

/// Metrics collected during one [`UiManager::update`](crate::UiManager::update).
#[derive(Debug, Clone, Default)]
pub struct UiMetrics {
    /// Time spent in behaviour `on_update` callbacks
    pub behavior_time: Duration,

    /// Time spent resolving anchors
    pub resolve_time: Duration,

    /// Time spent rebuilding the draw order
    pub order_time: Duration,

    /// Total time for the update
    pub total_time: Duration,

    /// Number of objects whose rectangle was computed
    pub objects_resolved: usize,

    /// Dirty objects skipped because they are hidden
    pub resolve_skips: usize,

    /// Number of objects that failed to resolve
    pub resolve_failures: usize,

    /// Total number of objects in the arena
    pub total_objects: usize,

    /// Whether the draw order had to be rebuilt
    pub order_rebuilt: bool,
}

impl UiMetrics {
    /// Create new empty metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Percentage of objects that needed resolution.
    pub fn resolved_percentage(&self) -> f32 {
        if self.total_objects == 0 {
            0.0
        } else {
            (self.objects_resolved as f32 / self.total_objects as f32) * 100.0
        }
    }

    /// Returns true if the update did no layout or ordering work.
    pub fn is_idle_frame(&self) -> bool {
        self.objects_resolved == 0 && self.resolve_failures == 0 && !self.order_rebuilt
    }

    /// Format metrics as a human-readable string.
    pub fn format_summary(&self) -> String {
        format!(
            "UI Update: {:.2}ms | Resolve: {:.2}ms ({} objects, {} failed, {} skipped) | Order: {:.2}ms{}",
            self.total_time.as_secs_f64() * 1000.0,
            self.resolve_time.as_secs_f64() * 1000.0,
            self.objects_resolved,
            self.resolve_failures,
            self.resolve_skips,
            self.order_time.as_secs_f64() * 1000.0,
            if self.order_rebuilt { " (rebuilt)" } else { "" },
        )
    }
}

/// Helper for timing sections of UI code.
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Stop the timer and return elapsed duration.
    pub fn stop(self) -> Duration {
        self.start.elapsed()
    }
}

use std::sync::Mutex;

/// Counts recomputations and rejected inputs across a chart session.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    recomputes: usize,
    rejected: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                recomputes: 0,
                rejected: 0,
            }),
        }
    }

    pub fn record_recompute(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.recomputes += 1;
        }
    }

    pub fn record_rejected(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.rejected += 1;
        }
    }

    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.recomputes, metrics.rejected)
        } else {
            (0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

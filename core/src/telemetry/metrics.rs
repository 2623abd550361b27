use std::sync::Mutex;

pub struct RunMetrics {
    inner: Mutex<Counters>,
}

struct Counters {
    folded: usize,
    skipped: usize,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Counters {
                folded: 0,
                skipped: 0,
            }),
        }
    }

    pub fn record_folded(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.folded += 1;
        }
    }

    pub fn record_skipped(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.skipped += 1;
        }
    }

    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(counters) = self.inner.lock() {
            (counters.folded, counters.skipped)
        } else {
            (0, 0)
        }
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}

//! Frame clock: turns host timestamps into clamped deltas.
//!
//! Hosts pause frame callbacks while a tab is hidden, so the first delta
//! after resuming can be seconds long. Deltas are clamped to `dt_max` and
//! never trusted raw.

/// Default clamp for a single frame delta, in milliseconds.
pub const DEFAULT_DT_MAX_MS: f64 = 50.0;

#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    dt_max: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_DT_MAX_MS)
    }
}

impl FrameClock {
    /// Create a clock clamping deltas to `dt_max_ms` milliseconds.
    pub fn new(dt_max_ms: f64) -> Self {
        Self {
            last_ms: None,
            dt_max: (dt_max_ms / 1000.0).max(0.0),
        }
    }

    /// Largest delta `tick` will ever return, in seconds.
    pub fn dt_max(&self) -> f64 {
        self.dt_max
    }

    /// Record `now_ms` and return `clamp(now - last, 0, dt_max)` in seconds.
    ///
    /// The first tick after construction or `reset` returns 0. A timestamp
    /// that does not advance also returns 0, and is not recorded.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let Some(last) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return 0.0;
        };
        if now_ms <= last {
            return 0.0;
        }
        self.last_ms = Some(now_ms);
        let raw = (now_ms - last) / 1000.0;
        if raw > self.dt_max {
            log::trace!("clamping frame delta {raw:.3}s to {:.3}s", self.dt_max);
        }
        raw.clamp(0.0, self.dt_max)
    }

    /// Forget the last timestamp (after a pause or remount).
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

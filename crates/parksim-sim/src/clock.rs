//! Frame clock: turns wall-clock timestamps into step deltas.
//!
//! The first frame after a reset only establishes a baseline, so a drive
//! session never starts with a delta measured from some stale timestamp.

/// Time baseline for the drive loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_frame_secs: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now_secs` and return the delta since the previous
    /// frame, or `None` if this frame only set the baseline.
    ///
    /// Deltas are returned raw; the engine decides what to do with zero,
    /// negative, or oversized values. Non-finite timestamps are ignored.
    pub fn tick(&mut self, now_secs: f64) -> Option<f64> {
        if !now_secs.is_finite() {
            return None;
        }
        let previous = self.last_frame_secs.replace(now_secs);
        previous.map(|prev| now_secs - prev)
    }

    /// Drop the baseline. The next `tick` returns `None`.
    pub fn reset(&mut self) {
        self.last_frame_secs = None;
    }

    pub fn has_baseline(&self) -> bool {
        self.last_frame_secs.is_some()
    }
}

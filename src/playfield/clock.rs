// Fixed-cadence tick clock driven by animation-frame timestamps.

/// Counts whole ticks elapsed since `start_ms`, the way a beat clock counts beats.
pub(super) struct TickClock {
    hz: f64,
    start_ms: f64,      // performance.now() when started
    last_tick_idx: i64, // index of last tick handed out
}

impl TickClock {
    pub(super) fn new(hz: f64, now: f64) -> Self {
        Self {
            hz,
            start_ms: now,
            last_tick_idx: 0,
        }
    }

    pub(super) fn tick_duration_ms(&self) -> f64 {
        1_000.0 / self.hz
    }

    pub(super) fn current_tick(&self, now: f64) -> f64 {
        (now - self.start_ms) / self.tick_duration_ms()
    }

    /// Whole ticks that became due since the last call, at most `max`. When the
    /// backlog is larger (tab in background, debugger pause) the surplus is
    /// dropped instead of replayed.
    pub(super) fn due_ticks(&mut self, now: f64, max: u32) -> u32 {
        let whole = self.current_tick(now).floor() as i64;
        if whole <= self.last_tick_idx {
            return 0;
        }
        let due = (whole - self.last_tick_idx).min(i64::from(max));
        self.last_tick_idx = whole;
        due as u32
    }
}

//! Frame clock

use std::time::Instant;

/// Wall-clock frames longer than this are clamped when ticking from `Instant`
const MAX_WALL_DELTA: f64 = 0.25;

/// Tracks wall-clock frame time; the simulation derives its own scaled delta
pub struct FrameClock {
    /// Total elapsed wall time in seconds
    pub elapsed_time: f64,
    /// Wall time since last frame in seconds
    pub delta_time: f64,
    /// Number of frames advanced so far
    pub frame: u64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            elapsed_time: 0.0,
            delta_time: 0.0,
            frame: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }

    /// Advance from the system clock. Call once per frame.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            self.frame += 1;
            return;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance_by(elapsed.min(MAX_WALL_DELTA));
    }

    /// Advance to an externally supplied monotonic time, in seconds
    pub fn advance(&mut self, now: f64) {
        let delta = (now - self.elapsed_time).max(0.0);
        self.advance_by(delta);
    }

    /// Advance by a fixed wall-clock delta (headless runs and tests)
    pub fn advance_by(&mut self, delta: f64) {
        self.first_tick = false;
        self.delta_time = delta.max(0.0);
        self.elapsed_time += self.delta_time;
        self.frame += 1;
    }

    /// Instantaneous frame rate, truncated; zero before the first real delta
    pub fn fps(&self) -> f64 {
        if self.delta_time > 0.0 {
            (1.0 / self.delta_time).trunc()
        } else {
            0.0
        }
    }
}

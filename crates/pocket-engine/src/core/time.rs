/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Upper bound on steps per frame (prevents the spiral of death).
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: 10,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// A wall-clock countdown advanced by tick deltas.
///
/// Armed with a duration, it counts down to zero and then stays expired
/// until re-armed. Re-arming mid-countdown replaces the remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }

    /// An already-expired countdown.
    pub fn expired() -> Self {
        Self { remaining: 0.0 }
    }

    pub fn arm(&mut self, seconds: f32) {
        self.remaining = seconds;
    }

    /// Still counting?
    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    /// Subtract `dt` if still running. Returns `true` while the countdown was
    /// running before this tick.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining > 0.0 {
            self.remaining -= dt;
            true
        } else {
            false
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0); // half a frame
        assert_eq!(ts.accumulate(0.010), 1); // over one frame total
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0), 10);
    }

    #[test]
    fn negative_frame_time_is_ignored() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(-5.0), 0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn countdown_runs_out() {
        let mut c = Countdown::new(0.5);
        assert!(c.is_running());
        assert!(c.tick(0.25));
        assert!(c.tick(0.25));
        assert!(!c.is_running());
        assert!(!c.tick(0.25), "expired countdown should not tick");
        assert_eq!(c.remaining(), 0.0);
    }

    #[test]
    fn countdown_rearm_replaces_remaining() {
        let mut c = Countdown::new(4.0);
        c.tick(1.0);
        c.arm(0.2);
        assert!((c.remaining() - 0.2).abs() < 1e-6);
        assert_eq!(Countdown::expired(), Countdown::default());
    }
}

//! Frame clock

use std::time::Instant;

/// Longest frame delta handed to the simulation, in seconds.
const MAX_DELTA: f64 = 0.25;

/// Tracks frame time for the tick loop.
///
/// `tick` reads the wall clock; `advance` feeds an explicit delta for
/// headless runs and tests. Both clamp the delta so a stalled frame does not
/// teleport the actor.
pub struct GameClock {
    /// Total elapsed game time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Number of frames ticked so far
    pub frame: u64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock from the wall clock. Call once per frame.
    ///
    /// The first tick always reports a zero delta.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.frame += 1;
            self.delta_time = 0.0;
            return 0.0;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed)
    }

    /// Advance the clock by an explicit delta in seconds.
    ///
    /// Negative or non-finite deltas count as zero.
    pub fn advance(&mut self, delta: f64) -> f64 {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        if delta > MAX_DELTA {
            tracing::debug!("clamping frame delta {:.3}s to {:.3}s", delta, MAX_DELTA);
        }
        self.first_tick = false;
        self.delta_time = delta.min(MAX_DELTA);
        self.total_time += self.delta_time;
        self.frame += 1;
        self.delta_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = GameClock::new();
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.frame, 0);
    }

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = GameClock::new();
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.frame, 1);
    }

    #[test]
    fn test_manual_advance_accumulates() {
        let mut clock = GameClock::new();
        clock.advance(1.0 / 60.0);
        clock.advance(1.0 / 60.0);
        assert!((clock.total_time - 2.0 / 60.0).abs() < 1e-12);
        assert_eq!(clock.frame, 2);
    }

    #[test]
    fn test_advance_clamps_stalls() {
        let mut clock = GameClock::new();
        assert_eq!(clock.advance(3.0), MAX_DELTA);
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.advance(f64::NAN), 0.0);
        assert!((clock.total_time - MAX_DELTA).abs() < 1e-12);
    }
}

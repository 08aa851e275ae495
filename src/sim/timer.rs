//! Tick-driven timer primitives
//!
//! All "wait N seconds, then X" scheduling in the sim is expressed as one of
//! these values advanced by the owner's `tick`. Cancellation is ownership:
//! dropping the owner drops its timers, so nothing fires after teardown.

use serde::{Deserialize, Serialize};

/// Repeating cadence timer. Fires once each time `period` elapses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cooldown {
    period: f32,
    elapsed: f32,
}

impl Cooldown {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt`; returns true if the cadence fired this tick.
    ///
    /// At most one firing per tick - if `dt` overshoots several periods the
    /// surplus is dropped rather than bursting, matching a spawn loop that
    /// sleeps between attempts.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.period {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    /// Restart the cadence from zero.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// One-shot delay. Fires exactly once, then stays exhausted until reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delay {
    remaining: f32,
    armed: bool,
}

impl Delay {
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration,
            armed: true,
        }
    }

    /// Advance by `dt`; returns true on the tick the delay elapses.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.armed {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.armed = false;
            true
        } else {
            false
        }
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_fires_on_period() {
        let mut c = Cooldown::new(1.0);
        assert!(!c.tick(0.5));
        assert!(c.tick(0.5));
        assert!(!c.tick(0.75));
        assert!(c.tick(0.25));
    }

    #[test]
    fn test_cooldown_does_not_burst() {
        let mut c = Cooldown::new(1.0);
        // A huge dt still fires only once
        assert!(c.tick(5.0));
        assert!(!c.tick(0.5));
    }

    #[test]
    fn test_delay_fires_once() {
        let mut d = Delay::new(2.0);
        assert!(!d.tick(1.0));
        assert!(d.tick(1.0));
        assert!(!d.tick(10.0));
        assert!(!d.is_armed());
    }

    #[test]
    fn test_delay_cancel() {
        let mut d = Delay::new(1.0);
        d.cancel();
        assert!(!d.tick(5.0));
    }
}

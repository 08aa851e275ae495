//! Level countdown clock
//!
//! Running until either the countdown hits zero (emitting a one-shot expiry
//! signal) or `stop()` is called. Stopping is terminal for the level
//! instance; a stopped clock never signals. Callers distinguish "won" from
//! "time ran out" by the signal, not the state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelClock {
    remaining: f32,
    running: bool,
}

impl LevelClock {
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration,
            running: true,
        }
    }

    /// Advance by `dt`. Returns true exactly once, on the tick the countdown
    /// reaches zero while still running. `remaining` never goes below zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        if self.remaining == 0.0 {
            self.running = false;
            return true;
        }
        false
    }

    /// Halt without the expiry signal (e.g. the level was won).
    pub fn stop(&mut self) {
        self.running = false;
    }

    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.running
    }
}

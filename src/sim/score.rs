//! Level score state machine
//!
//! Two states: in-progress and completed. Completion latches exactly once
//! when the score reaches the target; further points are silently ignored.

use serde::{Deserialize, Serialize};

/// Score tracking for one level instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSession {
    current: u32,
    target: u32,
    starting: u32,
    completed: bool,
}

impl ScoreSession {
    pub fn new(starting: u32, target: u32) -> Self {
        Self {
            current: starting,
            target,
            starting,
            completed: false,
        }
    }

    /// Apply points. Returns true only on the call that completes the level;
    /// the triggering call's points are applied before the transition. Once
    /// completed, this is a no-op (defined behavior, not an error).
    pub fn add_points(&mut self, points: u32) -> bool {
        if self.completed {
            return false;
        }
        self.current += points;
        if self.current >= self.target {
            self.completed = true;
            return true;
        }
        false
    }

    /// Back to in-progress at the starting score, for level (re)start.
    pub fn reset(&mut self) {
        self.current = self.starting;
        self.completed = false;
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> u32 {
        self.target
    }

    #[inline]
    pub fn completed(&self) -> bool {
        self.completed
    }
}

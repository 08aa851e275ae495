//! Events emitted during a simulation step
//!
//! The presentation layer consumes these for display, sound, and scene
//! loading. Events are published in the fixed step order documented on
//! [`Session::step`](super::session::Session::step).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Scene the core asks the host to transition to. Fire-and-forget; the core
/// never awaits completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneRequest {
    Menu,
    Level1,
    Win,
    Lose,
}

/// Executes scene transitions on behalf of the core.
pub trait SceneRequester {
    fn request_transition(&mut self, scene: SceneRequest);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    TargetSpawned { id: u32, pos: Vec2 },
    TargetExpired { id: u32 },
    TargetHit { id: u32, points: u32 },
    ScoreChanged { current: u32, target: u32 },
    LevelCompleted { score: u32 },
    TimeExpired,
    BonusGranted { amount: u32, total: u32 },
    TransitionRequested(SceneRequest),
}

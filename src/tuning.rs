//! Data-driven game balance
//!
//! Every gameplay knob lives here so levels can be rebalanced without code
//! changes. A `Tuning` deserializes from JSON (missing fields fall back to
//! defaults) and is validated once at session construction - a degenerate
//! configuration is a fatal boundary error, never something the sim tries to
//! limp along with.

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::sim::SceneRequest;

/// Spawn-placement and target knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Seconds between spawn attempts
    pub spawn_delay: f32,
    /// Seconds before an unclicked target vanishes
    pub target_ttl: f32,
    /// Base click radius before the tolerance bonus
    pub base_hit_radius: f32,
    pub points_per_click: u32,
    /// Edge margin as a fraction of the screen dimension
    pub margin_fraction: f32,
    /// Absolute floor on the edge margin
    pub min_margin: f32,
    /// Minimum distance between live targets at spawn time
    pub min_separation: f32,
    /// Placement attempt budget per spawn cycle
    pub max_attempts: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            spawn_delay: consts::SPAWN_DELAY,
            target_ttl: consts::TARGET_TTL,
            base_hit_radius: consts::TARGET_HIT_RADIUS,
            points_per_click: consts::POINTS_PER_CLICK,
            margin_fraction: consts::MARGIN_FRACTION,
            min_margin: consts::MIN_MARGIN,
            min_separation: consts::MIN_SEPARATION,
            max_attempts: consts::MAX_SPAWN_ATTEMPTS,
        }
    }
}

/// Per-level win condition knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelTuning {
    /// Level duration in seconds
    pub duration: f32,
    /// Score required to win
    pub target_score: u32,
    pub starting_score: u32,
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self {
            duration: consts::LEVEL_DURATION,
            target_score: consts::TARGET_SCORE,
            starting_score: 0,
        }
    }
}

/// Persistent-progress knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressTuning {
    /// Tolerance bonus granted on a loss
    pub loss_bonus: u32,
    /// Cap on the accumulated tolerance bonus
    pub max_bonus: u32,
}

impl Default for ProgressTuning {
    fn default() -> Self {
        Self {
            loss_bonus: consts::LOSS_BONUS,
            max_bonus: consts::MAX_BONUS,
        }
    }
}

/// Where a won level leads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VictoryScene {
    #[default]
    Win,
    Menu,
    Level1,
    /// Next level (currently the same as Level1)
    NextLevel,
}

impl VictoryScene {
    pub fn as_request(&self) -> SceneRequest {
        match self {
            VictoryScene::Win => SceneRequest::Win,
            VictoryScene::Menu => SceneRequest::Menu,
            VictoryScene::Level1 | VictoryScene::NextLevel => SceneRequest::Level1,
        }
    }
}

/// Complete game balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub spawn: SpawnTuning,
    pub level: LevelTuning,
    pub progress: ProgressTuning,
    pub victory_scene: VictoryScene,
    /// Seconds on the Win/Lose screen before auto-returning to the menu
    pub menu_delay: f32,
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject configurations the sim cannot run with.
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::invalid(field, "must be positive"))
            }
        }

        positive("spawn.spawn_delay", self.spawn.spawn_delay)?;
        positive("spawn.target_ttl", self.spawn.target_ttl)?;
        positive("spawn.base_hit_radius", self.spawn.base_hit_radius)?;
        positive("level.duration", self.level.duration)?;
        if self.spawn.max_attempts == 0 {
            return Err(TuningError::invalid("spawn.max_attempts", "must be at least 1"));
        }
        if !(0.0..0.5).contains(&self.spawn.margin_fraction) {
            return Err(TuningError::invalid(
                "spawn.margin_fraction",
                "must be in [0, 0.5)",
            ));
        }
        if self.spawn.min_separation < 0.0 {
            return Err(TuningError::invalid("spawn.min_separation", "must not be negative"));
        }
        if self.level.target_score <= self.level.starting_score {
            return Err(TuningError::invalid(
                "level.target_score",
                "must exceed starting_score",
            ));
        }
        if self.menu_delay < 0.0 {
            return Err(TuningError::invalid("menu_delay", "must not be negative"));
        }
        Ok(())
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn: SpawnTuning::default(),
            level: LevelTuning::default(),
            progress: ProgressTuning::default(),
            victory_scene: VictoryScene::default(),
            menu_delay: consts::MENU_DELAY,
        }
    }
}

/// Fatal configuration error, reported to the host at the boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuningError {
    Parse(String),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl TuningError {
    fn invalid(field: &'static str, reason: &'static str) -> Self {
        TuningError::Invalid { field, reason }
    }
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::Parse(msg) => write!(f, "tuning parse error: {msg}"),
            TuningError::Invalid { field, reason } => write!(f, "invalid tuning: {field} {reason}"),
        }
    }
}

impl std::error::Error for TuningError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let tuning = Tuning::from_json(r#"{"level": {"target_score": 10}}"#).unwrap();
        assert_eq!(tuning.level.target_score, 10);
        assert_eq!(tuning.spawn.spawn_delay, consts::SPAWN_DELAY);
    }

    #[test]
    fn test_rejects_zero_duration() {
        let mut tuning = Tuning::default();
        tuning.level.duration = 0.0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid { field: "level.duration", .. })
        ));
    }

    #[test]
    fn test_rejects_unreachable_target_score() {
        let mut tuning = Tuning::default();
        tuning.level.starting_score = 50;
        tuning.level.target_score = 50;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(Tuning::from_json("not json"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_victory_scene_mapping() {
        assert_eq!(VictoryScene::Win.as_request(), SceneRequest::Win);
        assert_eq!(VictoryScene::NextLevel.as_request(), SceneRequest::Level1);
    }
}

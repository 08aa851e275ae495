//! Head Rush - a whack-a-mole arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (placement, targets, score, clock, session)
//! - `tuning`: Data-driven game balance
//!
//! The crate is headless: the host supplies screen layout and click events and
//! executes scene transitions; the core is pure in-memory state driven by a
//! fixed per-frame tick.

pub mod sim;
pub mod tuning;

pub use sim::{FrameInput, GameEvent, Layout, SceneRequest, SceneRequester, Session};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz is plenty for click targets)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Spawn cadence (seconds between spawn attempts)
    pub const SPAWN_DELAY: f32 = 1.0;
    /// Target time-to-live (seconds before an unclicked target vanishes)
    pub const TARGET_TTL: f32 = 1.0;
    /// Base click radius of a freshly spawned target (screen units)
    pub const TARGET_HIT_RADIUS: f32 = 20.0;
    /// Points awarded per clicked target
    pub const POINTS_PER_CLICK: u32 = 1;

    /// Edge margin as a fraction of the screen dimension
    pub const MARGIN_FRACTION: f32 = 0.1;
    /// Absolute floor on the edge margin (screen units)
    pub const MIN_MARGIN: f32 = 50.0;
    /// Minimum distance between two live targets at spawn time
    pub const MIN_SEPARATION: f32 = 100.0;
    /// Placement attempt budget per spawn cycle
    pub const MAX_SPAWN_ATTEMPTS: u32 = 10;

    /// Level duration in seconds
    pub const LEVEL_DURATION: f32 = 30.0;
    /// Score required to win the level
    pub const TARGET_SCORE: u32 = 50;

    /// Tolerance bonus granted on a loss
    pub const LOSS_BONUS: u32 = 50;
    /// Cap on the accumulated tolerance bonus
    pub const MAX_BONUS: u32 = 50;

    /// Seconds spent on the Win/Lose screen before auto-returning to the menu
    pub const MENU_DELAY: f32 = 3.0;
}

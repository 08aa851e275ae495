//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Fixed event publish order (clicks, clock, spawner)
//! - No rendering or platform dependencies

pub mod clock;
pub mod events;
pub mod placement;
pub mod progress;
pub mod score;
pub mod session;
pub mod spawner;
pub mod timer;

pub use clock::LevelClock;
pub use events::{GameEvent, SceneRequest, SceneRequester};
pub use placement::{EdgeMargin, ScreenRect, try_place};
pub use progress::ProgressStore;
pub use score::ScoreSession;
pub use session::{FrameInput, Layout, Scene, Session};
pub use spawner::{Target, TargetSpawner};
pub use timer::{Cooldown, Delay};

//! Session orchestration and the scene state machine
//!
//! `Session` is the single owning context for a play session: it holds the
//! persistent progress store, the scene state machine (Menu, Level, Win,
//! Lose), and - while a level runs - the level instance bundling spawner,
//! score, clock, and a seed-derived RNG stream. There are no globals; every
//! component is constructed here and reached by reference.
//!
//! Step order within a level frame is fixed and deterministic:
//! 1. click events are scored (a completing click wins the level),
//! 2. the clock ticks (expiry loses the level),
//! 3. the spawner ticks (expire + cadence spawn).
//! Score-completion is therefore evaluated before clock-expiry: a click that
//! wins the level takes precedence over a timer expiring the same frame.
//! Win and lose are mutually exclusive per level instance - the first outcome
//! tears the instance down, and the dropped instance can emit nothing more.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::LevelClock;
use super::events::{GameEvent, SceneRequest, SceneRequester};
use super::placement::ScreenRect;
use super::progress::ProgressStore;
use super::score::ScoreSession;
use super::spawner::{Target, TargetSpawner};
use super::timer::Delay;
use crate::tuning::{Tuning, TuningError};

/// Current scene of the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Menu,
    Level,
    Win,
    Lose,
}

/// Screen geometry snapshot for one frame, in the placer's coordinate space
#[derive(Debug, Clone)]
pub struct Layout {
    pub bounds: ScreenRect,
    /// UI rectangles targets must not spawn inside
    pub exclusions: Vec<ScreenRect>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            bounds: ScreenRect::from_size(1280.0, 720.0),
            exclusions: Vec::new(),
        }
    }
}

/// Host input for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Ids of targets clicked this frame (resolved by the host, possibly via
    /// [`Session::target_at`])
    pub clicks: Vec<u32>,
    pub layout: Layout,
}

/// Level-scoped state, rebuilt fresh for every level and dropped on the
/// first win/lose outcome. Dropping it cancels all pending spawn cadence and
/// target lifetimes.
#[derive(Debug)]
struct LevelInstance {
    spawner: TargetSpawner,
    score: ScoreSession,
    clock: LevelClock,
    rng: Pcg32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LevelOutcome {
    Won,
    Lost,
}

/// The owning context for one play session
#[derive(Debug)]
pub struct Session {
    tuning: Tuning,
    seed: u64,
    levels_started: u64,
    scene: Scene,
    progress: ProgressStore,
    level: Option<LevelInstance>,
    /// Auto-return to menu while on the Win/Lose screen
    menu_return: Option<Delay>,
}

impl Session {
    /// Construct a session. Degenerate tuning is a fatal boundary error.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let max_bonus = tuning.progress.max_bonus;
        Ok(Self {
            tuning,
            seed,
            levels_started: 0,
            scene: Scene::Menu,
            progress: ProgressStore::new(max_bonus),
            level: None,
            menu_return: None,
        })
    }

    /// Start a level (from the menu or a Win/Lose screen). Requests the
    /// Level1 transition and builds a fresh level instance.
    pub fn start_level(&mut self, scenes: &mut dyn SceneRequester) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.request_and_enter(SceneRequest::Level1, scenes, &mut events);
        events
    }

    /// Start over from scratch: progress is wiped, then a level starts.
    pub fn new_game(&mut self, scenes: &mut dyn SceneRequester) -> Vec<GameEvent> {
        self.progress.reset_all();
        self.start_level(scenes)
    }

    /// Advance the session by one frame. See the module docs for the fixed
    /// step order.
    pub fn step(
        &mut self,
        dt: f32,
        input: &FrameInput,
        scenes: &mut dyn SceneRequester,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match self.scene {
            Scene::Level => self.step_level(dt, input, scenes, &mut events),
            Scene::Win | Scene::Lose => {
                let fired = match &mut self.menu_return {
                    Some(delay) => delay.tick(dt),
                    None => false,
                };
                if fired {
                    self.request_and_enter(SceneRequest::Menu, scenes, &mut events);
                }
            }
            Scene::Menu => {}
        }
        events
    }

    fn step_level(
        &mut self,
        dt: f32,
        input: &FrameInput,
        scenes: &mut dyn SceneRequester,
        events: &mut Vec<GameEvent>,
    ) {
        let Some(level) = self.level.as_mut() else {
            return;
        };

        let mut outcome = None;

        // 1. Clicks. Ids that already expired are defined no-ops.
        for &id in &input.clicks {
            let Some(points) = level.spawner.on_clicked(id) else {
                continue;
            };
            events.push(GameEvent::TargetHit { id, points });
            let completed = level.score.add_points(points);
            events.push(GameEvent::ScoreChanged {
                current: level.score.current(),
                target: level.score.target(),
            });
            if completed {
                level.clock.stop();
                events.push(GameEvent::LevelCompleted {
                    score: level.score.current(),
                });
                outcome = Some(LevelOutcome::Won);
                break;
            }
        }

        // 2. Clock. Skipped when a click already won this frame.
        if outcome.is_none() && level.clock.tick(dt) {
            events.push(GameEvent::TimeExpired);
            outcome = Some(LevelOutcome::Lost);
        }

        // 3. Spawner.
        let Some(outcome) = outcome else {
            let radius_mult = self.progress.effective_radius_multiplier();
            level.spawner.tick(
                dt,
                &input.layout.bounds,
                &input.layout.exclusions,
                radius_mult,
                &mut level.rng,
                events,
            );
            return;
        };

        match outcome {
            LevelOutcome::Won => {
                log::info!("level completed with score {}", self.current_score());
                let dest = self.tuning.victory_scene.as_request();
                self.request_and_enter(dest, scenes, events);
            }
            LevelOutcome::Lost => {
                log::info!("time expired at score {}", self.current_score());
                let amount = self.tuning.progress.loss_bonus;
                self.progress.grant_bonus(amount);
                events.push(GameEvent::BonusGranted {
                    amount,
                    total: self.progress.tolerance_bonus(),
                });
                self.request_and_enter(SceneRequest::Lose, scenes, events);
            }
        }
    }

    /// Ask the host for a transition and mirror it in the internal scene
    /// machine. Leaving the Level scene drops the level instance, which
    /// cancels everything it scheduled.
    fn request_and_enter(
        &mut self,
        dest: SceneRequest,
        scenes: &mut dyn SceneRequester,
        events: &mut Vec<GameEvent>,
    ) {
        scenes.request_transition(dest);
        events.push(GameEvent::TransitionRequested(dest));

        self.level = None;
        self.menu_return = None;
        match dest {
            SceneRequest::Menu => self.scene = Scene::Menu,
            SceneRequest::Level1 => {
                self.build_level();
                self.scene = Scene::Level;
            }
            SceneRequest::Win => {
                self.scene = Scene::Win;
                self.menu_return = Some(Delay::new(self.tuning.menu_delay));
            }
            SceneRequest::Lose => {
                self.scene = Scene::Lose;
                self.menu_return = Some(Delay::new(self.tuning.menu_delay));
            }
        }
    }

    fn build_level(&mut self) {
        // Per-level RNG stream derived from the session seed, so a replay of
        // the same session is reproducible level by level
        let ordinal = self.levels_started;
        self.levels_started += 1;
        let stream_seed = ordinal.wrapping_mul(2654435761).wrapping_add(self.seed);

        self.level = Some(LevelInstance {
            spawner: TargetSpawner::new(self.tuning.spawn.clone()),
            score: ScoreSession::new(self.tuning.level.starting_score, self.tuning.level.target_score),
            clock: LevelClock::new(self.tuning.level.duration),
            rng: Pcg32::seed_from_u64(stream_seed),
        });
    }

    // ── Read-only accessors for the presentation layer ──

    #[inline]
    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn current_score(&self) -> u32 {
        self.level.as_ref().map_or(0, |l| l.score.current())
    }

    pub fn target_score(&self) -> u32 {
        self.level
            .as_ref()
            .map_or(self.tuning.level.target_score, |l| l.score.target())
    }

    /// Seconds left on the level clock (0 outside a level)
    pub fn remaining(&self) -> f32 {
        self.level.as_ref().map_or(0.0, |l| l.clock.remaining())
    }

    pub fn live_targets(&self) -> &[Target] {
        self.level.as_ref().map_or(&[], |l| l.spawner.live_targets())
    }

    /// Resolve a pointer position to a live target id, if any
    pub fn target_at(&self, point: glam::Vec2) -> Option<u32> {
        self.level.as_ref().and_then(|l| l.spawner.target_at(point))
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::VictoryScene;

    /// Records every transition the core requests
    #[derive(Default)]
    struct RecordingScenes {
        requested: Vec<SceneRequest>,
    }

    impl SceneRequester for RecordingScenes {
        fn request_transition(&mut self, scene: SceneRequest) {
            self.requested.push(scene);
        }
    }

    fn quick_tuning() -> Tuning {
        let mut tuning = Tuning::default();
        tuning.level.target_score = 3;
        tuning.level.duration = 10.0;
        tuning.spawn.spawn_delay = 0.5;
        tuning.spawn.target_ttl = 5.0;
        tuning.menu_delay = 3.0;
        tuning
    }

    fn input() -> FrameInput {
        FrameInput::default()
    }

    /// Step until a target is live, then click it. Panics if no target ever
    /// spawns (placement on an empty 1280x720 screen cannot fail for long).
    fn click_one(session: &mut Session, scenes: &mut RecordingScenes) -> Vec<GameEvent> {
        for _ in 0..100 {
            if let Some(target) = session.live_targets().first() {
                let mut frame = input();
                frame.clicks.push(target.id);
                return session.step(0.01, &frame, scenes);
            }
            session.step(0.1, &input(), scenes);
        }
        panic!("no target spawned");
    }

    #[test]
    fn test_win_flow() {
        let mut session = Session::new(quick_tuning(), 7).unwrap();
        let mut scenes = RecordingScenes::default();
        session.start_level(&mut scenes);
        assert_eq!(session.scene(), Scene::Level);

        click_one(&mut session, &mut scenes);
        click_one(&mut session, &mut scenes);
        assert_eq!(session.current_score(), 2);
        assert_eq!(session.scene(), Scene::Level);

        let events = click_one(&mut session, &mut scenes);
        assert!(events.contains(&GameEvent::LevelCompleted { score: 3 }));
        assert_eq!(session.scene(), Scene::Win);
        assert_eq!(
            scenes.requested,
            vec![SceneRequest::Level1, SceneRequest::Win]
        );
        // No bonus on a win
        assert_eq!(session.progress().tolerance_bonus(), 0);
    }

    #[test]
    fn test_lose_flow_grants_bonus_once() {
        let mut session = Session::new(quick_tuning(), 7).unwrap();
        let mut scenes = RecordingScenes::default();
        session.start_level(&mut scenes);

        let events = session.step(10.0, &input(), &mut scenes);
        assert!(events.contains(&GameEvent::TimeExpired));
        assert!(events.contains(&GameEvent::BonusGranted { amount: 50, total: 50 }));
        assert_eq!(session.scene(), Scene::Lose);
        assert_eq!(session.progress().tolerance_bonus(), 50);
        assert_eq!(session.progress().session_bonus_earned(), 50);

        // Further frames on the Lose screen change nothing
        session.step(0.1, &input(), &mut scenes);
        assert_eq!(session.progress().session_bonus_earned(), 50);
    }

    #[test]
    fn test_winning_click_beats_same_frame_expiry() {
        let mut tuning = quick_tuning();
        tuning.level.target_score = 1;
        let mut session = Session::new(tuning, 7).unwrap();
        let mut scenes = RecordingScenes::default();
        session.start_level(&mut scenes);

        // Burn the clock down to its last fraction of a second
        while session.remaining() > 0.05 {
            session.step(0.04, &input(), &mut scenes);
        }
        assert_eq!(session.scene(), Scene::Level);

        // A frame that carries both a winning click and clock expiry
        let id = session
            .live_targets()
            .first()
            .map(|t| t.id)
            .expect("a target should be live near the end of the level");
        let mut frame = input();
        frame.clicks.push(id);
        session.step(1.0, &frame, &mut scenes);

        assert_eq!(session.scene(), Scene::Win);
        assert_eq!(session.progress().tolerance_bonus(), 0);
        assert!(!scenes.requested.contains(&SceneRequest::Lose));
    }

    #[test]
    fn test_auto_menu_return() {
        let mut session = Session::new(quick_tuning(), 7).unwrap();
        let mut scenes = RecordingScenes::default();
        session.start_level(&mut scenes);
        session.step(10.0, &input(), &mut scenes);
        assert_eq!(session.scene(), Scene::Lose);

        session.step(2.9, &input(), &mut scenes);
        assert_eq!(session.scene(), Scene::Lose);
        let events = session.step(0.2, &input(), &mut scenes);
        assert!(events.contains(&GameEvent::TransitionRequested(SceneRequest::Menu)));
        assert_eq!(session.scene(), Scene::Menu);
    }

    #[test]
    fn test_stale_click_is_ignored() {
        let mut session = Session::new(quick_tuning(), 7).unwrap();
        let mut scenes = RecordingScenes::default();
        session.start_level(&mut scenes);

        let mut frame = input();
        frame.clicks.push(12345);
        let events = session.step(0.01, &frame, &mut scenes);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::TargetHit { .. })));
        assert_eq!(session.current_score(), 0);
    }

    #[test]
    fn test_bonus_widens_next_level_targets() {
        let mut session = Session::new(quick_tuning(), 7).unwrap();
        let mut scenes = RecordingScenes::default();
        session.start_level(&mut scenes);
        session.step(10.0, &input(), &mut scenes); // lose, +50 bonus

        session.start_level(&mut scenes);
        for _ in 0..100 {
            if !session.live_targets().is_empty() {
                break;
            }
            session.step(0.1, &input(), &mut scenes);
        }
        let target = session.live_targets().first().expect("target spawned");
        assert_eq!(target.hit_radius, crate::consts::TARGET_HIT_RADIUS * 1.5);
    }

    #[test]
    fn test_victory_scene_restart() {
        let mut tuning = quick_tuning();
        tuning.level.target_score = 1;
        tuning.victory_scene = VictoryScene::Level1;
        let mut session = Session::new(tuning, 7).unwrap();
        let mut scenes = RecordingScenes::default();
        session.start_level(&mut scenes);

        click_one(&mut session, &mut scenes);
        // Winning leads straight into a fresh level
        assert_eq!(session.scene(), Scene::Level);
        assert_eq!(session.current_score(), 0);
    }

    #[test]
    fn test_new_game_resets_progress() {
        let mut session = Session::new(quick_tuning(), 7).unwrap();
        let mut scenes = RecordingScenes::default();
        session.start_level(&mut scenes);
        session.step(10.0, &input(), &mut scenes);
        assert_eq!(session.progress().tolerance_bonus(), 50);

        session.new_game(&mut scenes);
        assert_eq!(session.progress().tolerance_bonus(), 0);
        assert_eq!(session.scene(), Scene::Level);
    }

    #[test]
    fn test_rejects_degenerate_tuning() {
        let mut tuning = Tuning::default();
        tuning.spawn.max_attempts = 0;
        assert!(Session::new(tuning, 0).is_err());
    }
}

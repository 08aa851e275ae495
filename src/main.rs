//! Head Rush entry point
//!
//! Headless demo driver: runs the simulation at a fixed timestep while a
//! small bot plays, so the whole scene loop (Menu -> Level -> Win/Lose ->
//! Menu) can be watched through the log. Pass a seed as the first argument
//! for a reproducible run.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use head_rush::consts::SIM_DT;
use head_rush::sim::{
    FrameInput, GameEvent, Layout, Scene, SceneRequest, SceneRequester, ScreenRect, Session,
};
use head_rush::tuning::Tuning;

/// Seconds of simulated time the demo runs for
const DEMO_DURATION: f32 = 120.0;
/// Average bot reaction time in seconds
const BOT_REACTION: f32 = 0.35;

/// The host side of scene transitions: a real frontend would load scenes
/// here, the demo just logs them.
struct LoggingScenes;

impl SceneRequester for LoggingScenes {
    fn request_transition(&mut self, scene: SceneRequest) {
        log::info!("scene transition requested: {scene:?}");
    }
}

fn main() {
    env_logger::init();

    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);
    log::info!("starting demo session with seed {seed}");

    let mut session = Session::new(Tuning::default(), seed).expect("default tuning is valid");
    let mut scenes = LoggingScenes;
    let mut bot_rng = Pcg32::seed_from_u64(seed ^ 0xB07);

    // 720p screen with a HUD strip along the top reserved for score/timer
    let layout = Layout {
        bounds: ScreenRect::from_size(1280.0, 720.0),
        exclusions: vec![ScreenRect::new(Vec2::ZERO, Vec2::new(1280.0, 80.0))],
    };

    let frames = (DEMO_DURATION / SIM_DT) as u32;
    for _ in 0..frames {
        if session.scene() == Scene::Menu {
            for event in session.start_level(&mut scenes) {
                report(&event);
            }
            continue;
        }

        let mut input = FrameInput {
            clicks: Vec::new(),
            layout: layout.clone(),
        };
        // The bot notices a live target after roughly BOT_REACTION seconds
        if let Some(target) = session.live_targets().first() {
            if bot_rng.random::<f32>() < SIM_DT / BOT_REACTION {
                input.clicks.push(target.id);
            }
        }

        for event in session.step(SIM_DT, &input, &mut scenes) {
            report(&event);
        }
    }

    let progress = session.progress();
    log::info!(
        "demo finished: tolerance bonus {}, earned {} this session ({} lifetime)",
        progress.tolerance_bonus(),
        progress.session_bonus_earned(),
        progress.lifetime_bonus_earned()
    );
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::TargetSpawned { .. } | GameEvent::TargetExpired { .. } => {
            log::debug!("{event:?}")
        }
        GameEvent::ScoreChanged { current, target } => log::debug!("score {current}/{target}"),
        _ => log::info!("{event:?}"),
    }
}

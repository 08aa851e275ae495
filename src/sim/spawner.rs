//! Target population management
//!
//! The spawner owns every live target from spawn to removal. Targets appear
//! on a fixed cadence at placer-approved positions, age each tick, and vanish
//! when their time-to-live runs out - an unclicked target disappearing is
//! intended pressure, not an error. A clicked target is removed immediately,
//! so click and expiry can never both score the same target.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::placement::{EdgeMargin, ScreenRect, try_place};
use super::timer::Cooldown;
use crate::tuning::SpawnTuning;

/// A transient clickable target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec2,
    /// Seconds since spawn
    pub age: f32,
    /// Lifetime; the target is removed when `age >= ttl`
    pub ttl: f32,
    /// Click radius, already scaled by the tolerance-bonus multiplier
    pub hit_radius: f32,
    /// Points awarded when clicked
    pub points: u32,
}

/// Spawns, ages, and removes targets for one level instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSpawner {
    targets: Vec<Target>,
    cadence: Cooldown,
    tuning: SpawnTuning,
    next_id: u32,
}

impl TargetSpawner {
    pub fn new(tuning: SpawnTuning) -> Self {
        Self {
            targets: Vec::new(),
            cadence: Cooldown::new(tuning.spawn_delay),
            tuning,
            next_id: 1,
        }
    }

    /// Advance the population by one tick: age and expire live targets, then
    /// spawn a new one if the cadence is due and the placer finds room.
    /// Placement failure is silent - the next cadence tick retries.
    pub fn tick<R: Rng>(
        &mut self,
        dt: f32,
        bounds: &ScreenRect,
        exclusions: &[ScreenRect],
        radius_mult: f32,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        for target in &mut self.targets {
            target.age += dt;
        }
        self.targets.retain(|t| {
            if t.age >= t.ttl {
                events.push(GameEvent::TargetExpired { id: t.id });
                false
            } else {
                true
            }
        });

        if self.cadence.tick(dt) {
            self.spawn(bounds, exclusions, radius_mult, rng, events);
        }
    }

    fn spawn<R: Rng>(
        &mut self,
        bounds: &ScreenRect,
        exclusions: &[ScreenRect],
        radius_mult: f32,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        let existing: Vec<Vec2> = self.targets.iter().map(|t| t.pos).collect();
        let margin = EdgeMargin {
            fraction: self.tuning.margin_fraction,
            min_abs: self.tuning.min_margin,
        };
        let Some(pos) = try_place(
            bounds,
            margin,
            exclusions,
            &existing,
            self.tuning.min_separation,
            self.tuning.max_attempts,
            rng,
        ) else {
            return;
        };

        let id = self.next_id;
        self.next_id += 1;
        self.targets.push(Target {
            id,
            pos,
            age: 0.0,
            ttl: self.tuning.target_ttl,
            hit_radius: self.tuning.base_hit_radius * radius_mult,
            points: self.tuning.points_per_click,
        });
        log::debug!("spawned target {id} at {pos}");
        events.push(GameEvent::TargetSpawned { id, pos });
    }

    /// Handle a click on `id`. If the target is live it is removed at once
    /// and its points returned; a dead or unknown id yields `None`, so a
    /// target can never score twice.
    pub fn on_clicked(&mut self, id: u32) -> Option<u32> {
        let idx = self.targets.iter().position(|t| t.id == id)?;
        let target = self.targets.swap_remove(idx);
        Some(target.points)
    }

    /// Hit-test a pointer position against live targets, nearest first.
    /// Hosts that deliver raw positions instead of ids resolve clicks here;
    /// the hit radius already includes the tolerance bonus.
    pub fn target_at(&self, point: Vec2) -> Option<u32> {
        self.targets
            .iter()
            .filter(|t| t.pos.distance(point) <= t.hit_radius)
            .min_by(|a, b| {
                a.pos
                    .distance(point)
                    .partial_cmp(&b.pos.distance(point))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|t| t.id)
    }

    /// Drop all live targets and restart the cadence (level teardown).
    pub fn clear(&mut self) {
        self.targets.clear();
        self.cadence.reset();
    }

    pub fn live_targets(&self) -> &[Target] {
        &self.targets
    }
}

//! Spawn placement via rejection sampling
//!
//! Candidates are drawn uniformly from the screen bounds shrunk by an
//! adaptive edge margin, then rejected if they land inside a UI exclusion
//! rectangle or too close to an already-live target. Placement is
//! best-effort: exhausting the attempt budget yields `None` and the caller
//! skips that spawn cycle.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl ScreenRect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rect covering `(0,0)..(width,height)`
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Edge-inclusive containment: a point exactly on the boundary counts as
    /// inside. Exclusion zones rely on this so candidates can never flicker
    /// onto a UI edge.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Shrink the rect by `dx` on each side horizontally and `dy` vertically.
    /// Returns `None` if the margins meet or cross (degenerate region).
    pub fn shrink(&self, dx: f32, dy: f32) -> Option<ScreenRect> {
        let min = self.min + Vec2::new(dx, dy);
        let max = self.max - Vec2::new(dx, dy);
        if min.x >= max.x || min.y >= max.y {
            return None;
        }
        Some(ScreenRect { min, max })
    }
}

/// Adaptive edge margin: per axis, the larger of an absolute floor and a
/// fraction of the screen dimension
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EdgeMargin {
    /// Margin as a fraction of the screen dimension
    pub fraction: f32,
    /// Absolute floor in screen units
    pub min_abs: f32,
}

impl EdgeMargin {
    /// Effective margins (x, y) for the given bounds
    #[inline]
    pub fn resolve(&self, bounds: &ScreenRect) -> (f32, f32) {
        (
            self.min_abs.max(bounds.width() * self.fraction),
            self.min_abs.max(bounds.height() * self.fraction),
        )
    }
}

/// Try to find a valid spawn position within `bounds`.
///
/// For up to `max_attempts` tries, draws a candidate uniformly within the
/// margin-shrunk bounds and rejects it if it falls inside any exclusion
/// rectangle or within `min_separation` of any existing position (a distance
/// exactly equal to `min_separation` passes). Returns the first survivor, or
/// `None` once the budget is spent - the caller treats that as "skip this
/// spawn", not an error.
pub fn try_place<R: Rng>(
    bounds: &ScreenRect,
    margin: EdgeMargin,
    exclusions: &[ScreenRect],
    existing: &[Vec2],
    min_separation: f32,
    max_attempts: u32,
    rng: &mut R,
) -> Option<Vec2> {
    let (mx, my) = margin.resolve(bounds);
    let region = bounds.shrink(mx, my)?;

    for _ in 0..max_attempts {
        let candidate = Vec2::new(
            rng.random_range(region.min.x..region.max.x),
            rng.random_range(region.min.y..region.max.y),
        );

        if exclusions.iter().any(|zone| zone.contains(candidate)) {
            continue;
        }
        if existing.iter().any(|&p| candidate.distance(p) < min_separation) {
            continue;
        }
        return Some(candidate);
    }

    log::debug!("no valid spawn position within {max_attempts} attempts");
    None
}

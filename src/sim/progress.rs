//! Cross-level player progress
//!
//! The tolerance bonus widens the click radius of future targets and is
//! earned on a loss. The gameplay-affecting value is clamped at a cap, while
//! the lifetime/session counters keep recording the full amount granted -
//! they are an achievement ledger, not a gameplay value.
//!
//! Survives across level instances for the life of the process; the host may
//! persist it (it serializes), the core never touches disk.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressStore {
    tolerance_bonus: u32,
    max_bonus: u32,
    lifetime_bonus_earned: u32,
    session_bonus_earned: u32,
}

impl ProgressStore {
    pub fn new(max_bonus: u32) -> Self {
        Self {
            tolerance_bonus: 0,
            max_bonus,
            lifetime_bonus_earned: 0,
            session_bonus_earned: 0,
        }
    }

    /// Grant a tolerance bonus. The bonus itself is clamped at `max_bonus`
    /// (overflow is absorbed); both counters record the full unclamped
    /// amount.
    pub fn grant_bonus(&mut self, amount: u32) {
        self.tolerance_bonus = (self.tolerance_bonus + amount).min(self.max_bonus);
        self.lifetime_bonus_earned += amount;
        self.session_bonus_earned += amount;
        log::info!(
            "granted {amount} tolerance bonus (now {}, session {})",
            self.tolerance_bonus,
            self.session_bonus_earned
        );
    }

    /// Multiplier applied to target hit radii: 1.0 at zero bonus, 1.5 at 50.
    #[inline]
    pub fn effective_radius_multiplier(&self) -> f32 {
        1.0 + self.tolerance_bonus as f32 / 100.0
    }

    /// Full new-game reset.
    pub fn reset_all(&mut self) {
        self.tolerance_bonus = 0;
        self.lifetime_bonus_earned = 0;
        self.session_bonus_earned = 0;
        log::info!("player progress reset");
    }

    #[inline]
    pub fn tolerance_bonus(&self) -> u32 {
        self.tolerance_bonus
    }

    #[inline]
    pub fn lifetime_bonus_earned(&self) -> u32 {
        self.lifetime_bonus_earned
    }

    #[inline]
    pub fn session_bonus_earned(&self) -> u32 {
        self.session_bonus_earned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_clamped_at_cap() {
        let mut progress = ProgressStore::new(50);
        progress.grant_bonus(50);
        assert_eq!(progress.tolerance_bonus(), 50);
        progress.grant_bonus(50);
        assert_eq!(progress.tolerance_bonus(), 50);
    }

    #[test]
    fn test_counters_are_unclamped() {
        let mut progress = ProgressStore::new(50);
        progress.grant_bonus(50);
        progress.grant_bonus(50);
        progress.grant_bonus(50);
        assert_eq!(progress.lifetime_bonus_earned(), 150);
        assert_eq!(progress.session_bonus_earned(), 150);
    }

    #[test]
    fn test_radius_multiplier() {
        let mut progress = ProgressStore::new(50);
        assert_eq!(progress.effective_radius_multiplier(), 1.0);
        progress.grant_bonus(50);
        assert_eq!(progress.effective_radius_multiplier(), 1.5);
    }

    #[test]
    fn test_reset_all() {
        let mut progress = ProgressStore::new(50);
        progress.grant_bonus(80);
        progress.reset_all();
        assert_eq!(progress.tolerance_bonus(), 0);
        assert_eq!(progress.lifetime_bonus_earned(), 0);
        assert_eq!(progress.session_bonus_earned(), 0);
    }
}

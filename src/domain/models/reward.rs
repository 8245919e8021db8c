//! Reward domain model.
//!
//! Rewards are user-defined treats gated behind an XP or streak threshold.
//! Unlocking is monotonic: once a reward unlocks it never re-locks, and a
//! claim is only valid on an unlocked, unclaimed reward.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default icon when none is specified.
pub const DEFAULT_REWARD_ICON: &str = "🎁";

/// A claimable treat gated behind an XP and/or streak threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Human-readable title
    pub title: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Display icon
    pub icon: String,
    /// Total-XP threshold; `None` means XP never unlocks this reward
    pub xp_required: Option<u32>,
    /// Streak threshold; `None` means streaks never unlock this reward
    pub streak_required: Option<u32>,
    /// Whether the reward is available to claim (monotonic, never reset)
    pub unlocked: bool,
    /// Whether the user has spent the reward
    pub claimed: bool,
    /// When created
    pub created_at: DateTime<Utc>,
}

impl Reward {
    pub fn new(user_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            description: None,
            icon: DEFAULT_REWARD_ICON.to_string(),
            xp_required: None,
            streak_required: None,
            unlocked: false,
            claimed: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_xp_required(mut self, xp: u32) -> Self {
        self.xp_required = Some(xp);
        self
    }

    pub fn with_streak_required(mut self, streak: u32) -> Self {
        self.streak_required = Some(streak);
        self
    }

    /// Set starting unlock state (used by seeding).
    pub fn with_unlocked(mut self, unlocked: bool) -> Self {
        self.unlocked = unlocked;
        self
    }

    /// Whether the given totals satisfy at least one configured threshold.
    /// Rewards with neither threshold set never auto-unlock.
    pub fn threshold_met(&self, total_xp: u32, streak: u32) -> bool {
        let xp_met = self.xp_required.is_some_and(|required| total_xp >= required);
        let streak_met = self
            .streak_required
            .is_some_and(|required| streak >= required);
        xp_met || streak_met
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Reward title cannot be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_met_xp() {
        let reward = Reward::new(Uuid::new_v4(), "Shopping Spree").with_xp_required(500);
        assert!(!reward.threshold_met(499, 100));
        assert!(reward.threshold_met(500, 0));
        assert!(reward.threshold_met(520, 0));
    }

    #[test]
    fn test_threshold_met_streak() {
        let reward = Reward::new(Uuid::new_v4(), "Movie Night").with_streak_required(3);
        assert!(!reward.threshold_met(10_000, 2));
        assert!(reward.threshold_met(0, 3));
    }

    #[test]
    fn test_either_threshold_unlocks() {
        let reward = Reward::new(Uuid::new_v4(), "Day Off")
            .with_xp_required(1000)
            .with_streak_required(14);
        assert!(reward.threshold_met(1000, 0));
        assert!(reward.threshold_met(0, 14));
        assert!(!reward.threshold_met(999, 13));
    }

    #[test]
    fn test_no_threshold_never_unlocks() {
        let reward = Reward::new(Uuid::new_v4(), "Mystery Box");
        assert!(!reward.threshold_met(u32::MAX, u32::MAX));
    }
}

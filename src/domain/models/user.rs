//! User domain model.
//!
//! A user owns all quests, categories, rewards, and achievements and carries
//! the progression state (XP, level, streak) that quest completions advance.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::progression::XP_PER_LEVEL;

/// A user of the tracker, with progression state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Unique display name
    pub username: String,
    /// Current level, derived from total XP (starts at 1)
    pub level: u32,
    /// XP within the current level, always `total_xp % XP_PER_LEVEL`
    pub current_xp: u32,
    /// Lifetime XP, monotonically non-decreasing
    pub total_xp: u32,
    /// Consecutive-day activity counter
    pub streak: u32,
    /// Calendar date of the most recent completion, if any
    pub last_active_date: Option<NaiveDate>,
    /// When created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user at level 1 with no XP or streak.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            level: 1,
            current_xp: 0,
            total_xp: 0,
            streak: 0,
            last_active_date: None,
            created_at: Utc::now(),
        }
    }

    /// Set starting progression state (used by seeding).
    pub fn with_progress(mut self, level: u32, current_xp: u32, total_xp: u32) -> Self {
        self.level = level;
        self.current_xp = current_xp;
        self.total_xp = total_xp;
        self
    }

    /// Set starting streak state (used by seeding).
    pub fn with_streak(mut self, streak: u32, last_active_date: Option<NaiveDate>) -> Self {
        self.streak = streak;
        self.last_active_date = last_active_date;
        self
    }

    /// Check the derived-field invariants: `level = total/500 + 1` and
    /// `current = total % 500`.
    pub fn progression_consistent(&self) -> bool {
        self.level == self.total_xp / XP_PER_LEVEL + 1
            && self.current_xp == self.total_xp % XP_PER_LEVEL
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.username.trim().is_empty() {
            return Err("Username cannot be empty".to_string());
        }
        if self.level == 0 {
            return Err("Level must be at least 1".to_string());
        }
        if self.current_xp >= XP_PER_LEVEL {
            return Err(format!("Current XP must be below {XP_PER_LEVEL}"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new("Alex the Warrior");
        assert_eq!(user.username, "Alex the Warrior");
        assert_eq!(user.level, 1);
        assert_eq!(user.current_xp, 0);
        assert_eq!(user.total_xp, 0);
        assert_eq!(user.streak, 0);
        assert!(user.last_active_date.is_none());
        assert!(user.progression_consistent());
    }

    #[test]
    fn test_validation() {
        assert!(User::new("").validate().is_err());
        assert!(User::new("   ").validate().is_err());
        assert!(User::new("alex").validate().is_ok());

        let overflow = User::new("alex").with_progress(1, 500, 500);
        assert!(overflow.validate().is_err());
    }

    #[test]
    fn test_progression_consistency_check() {
        let ok = User::new("alex").with_progress(2, 20, 520);
        assert!(ok.progression_consistent());

        let stale_level = User::new("alex").with_progress(1, 20, 520);
        assert!(!stale_level.progression_consistent());
    }
}

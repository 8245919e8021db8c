//! Pure progression calculators.
//!
//! Everything the completion transaction needs to decide — XP accounting,
//! level math, streak continuity, achievement milestones — lives here as
//! plain functions over values, so correctness can be tested without a
//! storage backend. The completion service commits the results.

use chrono::NaiveDate;

use crate::domain::models::{Achievement, User};

/// Flat XP threshold per level. A level is `total_xp / 500 + 1`, so a single
/// large gain that crosses several levels collapses directly to the right
/// remainder without iterative leveling.
pub const XP_PER_LEVEL: u32 = 500;

/// Informational XP attached to a "Level Up!" achievement.
pub const LEVEL_UP_ACHIEVEMENT_XP: u32 = 50;

/// Informational XP attached to a "Streak Master" achievement.
pub const STREAK_ACHIEVEMENT_XP: u32 = 100;

/// Streak milestones are awarded at every multiple of seven days.
pub const STREAK_MILESTONE_DAYS: u32 = 7;

/// Result of applying a quest's XP to a user's progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    /// XP within the (possibly new) level: `new_total_xp % XP_PER_LEVEL`
    pub new_current_xp: u32,
    /// Lifetime XP after the gain
    pub new_total_xp: u32,
    /// Level after the gain
    pub new_level: u32,
    /// Whether at least one level boundary was crossed
    pub leveled_up: bool,
}

/// XP and level accounting for a single quest completion.
pub struct ProgressionCalculator;

impl ProgressionCalculator {
    /// Apply `quest_xp` to the user's totals.
    pub fn advance(user: &User, quest_xp: u32) -> Progression {
        let new_total_xp = user.total_xp + quest_xp;
        let new_level = new_total_xp / XP_PER_LEVEL + 1;
        Progression {
            new_current_xp: new_total_xp % XP_PER_LEVEL,
            new_total_xp,
            new_level,
            leveled_up: new_level > user.level,
        }
    }
}

/// How streaks behave when a day is skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakPolicy {
    /// When true, a gap of more than one calendar day resets the streak to 1.
    /// The historical behavior (false) increments regardless of gaps.
    pub reset_on_gap: bool,
}

/// Consecutive-day activity counting.
pub struct StreakTracker;

impl StreakTracker {
    /// Compute the streak after a completion on `today`.
    ///
    /// A second completion on the same calendar day leaves the streak
    /// unchanged, so multiple completions never double-count a day.
    pub fn next(user: &User, today: NaiveDate, policy: StreakPolicy) -> u32 {
        match user.last_active_date {
            Some(last) if last == today => user.streak,
            Some(last) if policy.reset_on_gap && (today - last).num_days() > 1 => 1,
            _ => user.streak + 1,
        }
    }
}

/// Decide which achievements a completion earns.
///
/// A level-up yields exactly one "Level Up!" record regardless of how many
/// levels were crossed. Every streak that lands on a multiple of seven
/// (7, 14, 21, ...) appends a fresh "Streak Master" row; the modulo gate is
/// the only dedupe. The `xp_reward` on these records is informational and is
/// never credited back to the user's totals.
pub fn earned_achievements(user: &User, progression: Progression, new_streak: u32) -> Vec<Achievement> {
    let mut earned = Vec::new();

    if progression.leveled_up {
        earned.push(
            Achievement::new(user.id, "Level Up!")
                .with_description(format!("Reached level {}", progression.new_level))
                .with_icon("⭐")
                .with_xp_reward(LEVEL_UP_ACHIEVEMENT_XP),
        );
    }

    if new_streak >= STREAK_MILESTONE_DAYS && new_streak % STREAK_MILESTONE_DAYS == 0 {
        earned.push(
            Achievement::new(user.id, "Streak Master")
                .with_description(format!("Maintained {new_streak} day streak"))
                .with_icon("🔥")
                .with_xp_reward(STREAK_ACHIEVEMENT_XP),
        );
    }

    earned
}

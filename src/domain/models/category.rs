//! Category domain model.
//!
//! Per-user rolling aggregates of completed-quest XP and counts, keyed by
//! category name. Rows are pre-seeded; the completion path never creates one.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-user, per-category running totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Category name, unique per user
    pub name: String,
    /// Display color token (e.g. "chart-1")
    pub color: String,
    /// Sum of XP from completed quests in this category
    pub total_xp: u32,
    /// Count of completed quests in this category
    pub quest_count: u32,
}

impl Category {
    pub fn new(user_id: Uuid, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            color: color.into(),
            total_xp: 0,
            quest_count: 0,
        }
    }

    /// Set starting totals (used by seeding).
    pub fn with_totals(mut self, total_xp: u32, quest_count: u32) -> Self {
        self.total_xp = total_xp;
        self.quest_count = quest_count;
        self
    }

    /// Fold one completed quest's XP into the rolling totals.
    pub fn record_completion(&mut self, quest_xp: u32) {
        self.total_xp += quest_xp;
        self.quest_count += 1;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Category name cannot be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_completion() {
        let mut category = Category::new(Uuid::new_v4(), "Health", "chart-1");
        assert_eq!((category.total_xp, category.quest_count), (0, 0));

        category.record_completion(20);
        assert_eq!((category.total_xp, category.quest_count), (20, 1));

        category.record_completion(50);
        assert_eq!((category.total_xp, category.quest_count), (70, 2));
    }
}

//! Achievement domain model.
//!
//! Achievements are an append-only log: created by the completion path,
//! never updated or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default icon when none is specified.
pub const DEFAULT_ACHIEVEMENT_ICON: &str = "🏆";

/// An append-only record of a milestone reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Milestone title (e.g. "Level Up!")
    pub title: String,
    /// Optional detail line
    pub description: Option<String>,
    /// Display icon
    pub icon: String,
    /// Informational XP value; not credited back to the user
    pub xp_reward: u32,
    /// When the milestone was reached
    pub unlocked_at: DateTime<Utc>,
}

impl Achievement {
    pub fn new(user_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            description: None,
            icon: DEFAULT_ACHIEVEMENT_ICON.to_string(),
            xp_reward: 0,
            unlocked_at: Utc::now(),
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

    pub fn with_xp_reward(mut self, xp_reward: u32) -> Self {
        self.xp_reward = xp_reward;
        self
    }
}

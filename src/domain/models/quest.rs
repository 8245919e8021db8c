//! Quest domain model.
//!
//! Quests are user-defined tasks that pay out XP when completed. Completion
//! is a one-way transition driven by the completion service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default XP payout for a quest when none is specified.
pub const DEFAULT_QUEST_XP: u32 = 20;

/// Lifecycle status of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    /// Quest is open and can be completed
    Active,
    /// Quest has been completed, XP credited
    Completed,
    /// Quest was shelved without completion
    Archived,
}

impl Default for QuestStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl QuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "completed" | "complete" => Some(Self::Completed),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    /// Terminal statuses cannot transition anywhere.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Valid transitions from this status.
    pub fn valid_transitions(&self) -> Vec<QuestStatus> {
        match self {
            Self::Active => vec![Self::Completed, Self::Archived],
            Self::Archived => vec![Self::Active],
            Self::Completed => vec![],
        }
    }

    pub fn can_transition_to(&self, new_status: Self) -> bool {
        self.valid_transitions().contains(&new_status)
    }
}

/// A user-defined task with an XP reward, category, and completion status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Human-readable title
    pub title: String,
    /// Optional longer description
    pub description: Option<String>,
    /// XP credited on completion
    pub xp: u32,
    /// Free-form time estimate shown in listings (e.g. "20 min")
    pub time_estimate: Option<String>,
    /// Category name used for aggregate rollups
    pub category: String,
    /// Current status
    pub status: QuestStatus,
    /// Set exactly when the quest transitions to completed
    pub completed_at: Option<DateTime<Utc>>,
    /// When created
    pub created_at: DateTime<Utc>,
}

impl Quest {
    /// Create a new active quest with the default XP payout.
    pub fn new(user_id: Uuid, title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            description: None,
            xp: DEFAULT_QUEST_XP,
            time_estimate: None,
            category: category.into(),
            status: QuestStatus::default(),
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_xp(mut self, xp: u32) -> Self {
        self.xp = xp;
        self
    }

    pub fn with_time_estimate(mut self, estimate: impl Into<String>) -> Self {
        self.time_estimate = Some(estimate.into());
        self
    }

    pub fn can_transition_to(&self, new_status: QuestStatus) -> bool {
        self.status.can_transition_to(new_status)
    }

    /// Transition to a new status. Completion stamps `completed_at`.
    pub fn transition_to(&mut self, new_status: QuestStatus) -> Result<(), String> {
        if !self.can_transition_to(new_status) {
            return Err(format!(
                "Cannot transition from {} to {}",
                self.status.as_str(),
                new_status.as_str()
            ));
        }

        self.status = new_status;
        if new_status == QuestStatus::Completed {
            self.completed_at = Some(Utc::now());
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Quest title cannot be empty".to_string());
        }
        if self.category.trim().is_empty() {
            return Err("Quest category cannot be empty".to_string());
        }
        if self.xp == 0 {
            return Err("Quest XP must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quest_creation() {
        let user_id = Uuid::new_v4();
        let quest = Quest::new(user_id, "Morning Meditation", "Health")
            .with_description("20 minutes of mindfulness practice")
            .with_time_estimate("20 min");

        assert_eq!(quest.status, QuestStatus::Active);
        assert_eq!(quest.xp, DEFAULT_QUEST_XP);
        assert!(quest.completed_at.is_none());
        assert!(quest.validate().is_ok());
    }

    #[test]
    fn test_completion_is_one_way() {
        let mut quest = Quest::new(Uuid::new_v4(), "Read 30 Pages", "Personal");

        quest.transition_to(QuestStatus::Completed).unwrap();
        assert!(quest.completed_at.is_some());

        // No path out of completed
        assert!(quest.transition_to(QuestStatus::Active).is_err());
        assert!(quest.transition_to(QuestStatus::Archived).is_err());
    }

    #[test]
    fn test_archive_and_reactivate() {
        let mut quest = Quest::new(Uuid::new_v4(), "Stretch", "Health");
        quest.transition_to(QuestStatus::Archived).unwrap();
        assert!(quest.completed_at.is_none());
        quest.transition_to(QuestStatus::Active).unwrap();
        assert_eq!(quest.status, QuestStatus::Active);
    }

    #[test]
    fn test_validation() {
        let quest = Quest::new(Uuid::new_v4(), "", "Health");
        assert!(quest.validate().is_err());

        let quest = Quest::new(Uuid::new_v4(), "Valid", "Health").with_xp(0);
        assert!(quest.validate().is_err());

        let quest = Quest::new(Uuid::new_v4(), "Valid", "  ");
        assert!(quest.validate().is_err());
    }
}

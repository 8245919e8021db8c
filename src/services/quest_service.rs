//! Quest CRUD and lifecycle transitions other than completion.
//!
//! Completion lives in `QuestCompletionService`; this service covers
//! creation, listing, field edits, archiving, and deletion.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Quest, QuestStatus};
use crate::domain::ports::{QuestFilter, QuestRepository, UserRepository};

/// Caller-supplied field edits; `None` leaves the field as is.
#[derive(Debug, Default, Clone)]
pub struct QuestUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub xp: Option<u32>,
    pub time_estimate: Option<String>,
    pub category: Option<String>,
}

pub struct QuestService {
    quests: Arc<dyn QuestRepository>,
    users: Arc<dyn UserRepository>,
}

impl QuestService {
    pub fn new(quests: Arc<dyn QuestRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { quests, users }
    }

    /// Create a quest owned by an existing user.
    pub async fn create(&self, quest: Quest) -> DomainResult<Quest> {
        quest.validate().map_err(DomainError::ValidationFailed)?;

        if self.users.get(quest.user_id).await?.is_none() {
            return Err(DomainError::UserNotFound(quest.user_id));
        }

        self.quests.create(&quest).await?;
        Ok(quest)
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Quest> {
        self.quests
            .get(id)
            .await?
            .ok_or(DomainError::QuestNotFound(id))
    }

    pub async fn list(&self, user_id: Uuid, filter: QuestFilter) -> DomainResult<Vec<Quest>> {
        self.quests.list_for_user(user_id, filter).await
    }

    /// Apply field edits to a quest. Status is never edited this way.
    pub async fn update(&self, id: Uuid, update: QuestUpdate) -> DomainResult<Quest> {
        let mut quest = self.get(id).await?;

        if let Some(title) = update.title {
            quest.title = title;
        }
        if let Some(description) = update.description {
            quest.description = Some(description);
        }
        if let Some(xp) = update.xp {
            quest.xp = xp;
        }
        if let Some(time_estimate) = update.time_estimate {
            quest.time_estimate = Some(time_estimate);
        }
        if let Some(category) = update.category {
            quest.category = category;
        }

        quest.validate().map_err(DomainError::ValidationFailed)?;
        self.quests.update(&quest).await?;
        Ok(quest)
    }

    /// Shelve an active quest.
    pub async fn archive(&self, id: Uuid) -> DomainResult<Quest> {
        self.transition(id, QuestStatus::Archived).await
    }

    /// Bring an archived quest back to active.
    pub async fn reactivate(&self, id: Uuid) -> DomainResult<Quest> {
        self.transition(id, QuestStatus::Active).await
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.quests.delete(id).await
    }

    async fn transition(&self, id: Uuid, to: QuestStatus) -> DomainResult<Quest> {
        let mut quest = self.get(id).await?;
        let from = quest.status;
        quest
            .transition_to(to)
            .map_err(|_| DomainError::InvalidStateTransition {
                from: from.as_str().to_string(),
                to: to.as_str().to_string(),
            })?;
        self.quests.update(&quest).await?;
        Ok(quest)
    }
}

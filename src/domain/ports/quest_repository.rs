use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Quest, QuestStatus};

/// Filters for querying a user's quests.
#[derive(Default, Debug, Clone)]
pub struct QuestFilter {
    pub status: Option<QuestStatus>,
    pub category: Option<String>,
}

/// Repository port for quest persistence.
#[async_trait]
pub trait QuestRepository: Send + Sync {
    /// Insert a new quest.
    async fn create(&self, quest: &Quest) -> DomainResult<()>;

    /// Get a quest by ID.
    async fn get(&self, id: Uuid) -> DomainResult<Option<Quest>>;

    /// Update an existing quest. Fails with `QuestNotFound` if missing.
    async fn update(&self, quest: &Quest) -> DomainResult<()>;

    /// Delete a quest by ID. Fails with `QuestNotFound` if missing.
    async fn delete(&self, id: Uuid) -> DomainResult<()>;

    /// List a user's quests, newest first, with optional filters.
    async fn list_for_user(&self, user_id: Uuid, filter: QuestFilter) -> DomainResult<Vec<Quest>>;
}

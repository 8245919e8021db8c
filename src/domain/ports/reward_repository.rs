use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::Reward;

/// Repository port for reward persistence.
#[async_trait]
pub trait RewardRepository: Send + Sync {
    /// Insert a new reward.
    async fn create(&self, reward: &Reward) -> DomainResult<()>;

    /// Get a reward by ID.
    async fn get(&self, id: Uuid) -> DomainResult<Option<Reward>>;

    /// Update an existing reward. Fails with `RewardNotFound` if missing.
    async fn update(&self, reward: &Reward) -> DomainResult<()>;

    /// Delete a reward by ID. Fails with `RewardNotFound` if missing.
    async fn delete(&self, id: Uuid) -> DomainResult<()>;

    /// List all of a user's rewards.
    async fn list_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Reward>>;
}

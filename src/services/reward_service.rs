//! Reward CRUD and the claim operation.
//!
//! Unlocking is driven by the completion service; this service only
//! creates, lists, deletes, and claims.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Reward;
use crate::domain::ports::RewardRepository;

pub struct RewardService {
    rewards: Arc<dyn RewardRepository>,
}

impl RewardService {
    pub fn new(rewards: Arc<dyn RewardRepository>) -> Self {
        Self { rewards }
    }

    pub async fn create(&self, reward: Reward) -> DomainResult<Reward> {
        reward.validate().map_err(DomainError::ValidationFailed)?;
        self.rewards.create(&reward).await?;
        Ok(reward)
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Reward> {
        self.rewards
            .get(id)
            .await?
            .ok_or(DomainError::RewardNotFound(id))
    }

    pub async fn list(&self, user_id: Uuid) -> DomainResult<Vec<Reward>> {
        self.rewards.list_for_user(user_id).await
    }

    /// Claim an unlocked, unclaimed reward.
    pub async fn claim(&self, id: Uuid) -> DomainResult<Reward> {
        let mut reward = self.get(id).await?;

        if !reward.unlocked {
            return Err(DomainError::RewardLocked(id));
        }
        if reward.claimed {
            return Err(DomainError::RewardAlreadyClaimed(id));
        }

        reward.claimed = true;
        self.rewards.update(&reward).await?;
        info!(reward = %reward.title, "reward claimed");
        Ok(reward)
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.rewards.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{
        create_migrated_test_pool, SqliteRewardRepository, SqliteUserRepository,
    };
    use crate::domain::models::User;
    use crate::domain::ports::UserRepository;

    async fn setup() -> (RewardService, User) {
        let pool = create_migrated_test_pool().await.unwrap();
        let user = User::new("alex");
        SqliteUserRepository::new(pool.clone())
            .create(&user)
            .await
            .unwrap();
        let svc = RewardService::new(Arc::new(SqliteRewardRepository::new(pool)));
        (svc, user)
    }

    #[tokio::test]
    async fn test_claim_unlocked_reward() {
        let (svc, user) = setup().await;
        let reward = svc
            .create(
                Reward::new(user.id, "Game Time")
                    .with_xp_required(100)
                    .with_unlocked(true),
            )
            .await
            .unwrap();

        let claimed = svc.claim(reward.id).await.unwrap();
        assert!(claimed.claimed);

        let err = svc.claim(reward.id).await.unwrap_err();
        assert!(matches!(err, DomainError::RewardAlreadyClaimed(_)));
    }

    #[tokio::test]
    async fn test_claim_locked_reward_conflicts() {
        let (svc, user) = setup().await;
        let reward = svc
            .create(Reward::new(user.id, "Shopping Spree").with_xp_required(5000))
            .await
            .unwrap();

        let err = svc.claim(reward.id).await.unwrap_err();
        assert!(matches!(err, DomainError::RewardLocked(_)));
        assert!(err.is_conflict());

        // The failed claim changed nothing.
        let stored = svc.get(reward.id).await.unwrap();
        assert!(!stored.claimed);
    }

    #[tokio::test]
    async fn test_blank_title_rejected() {
        let (svc, user) = setup().await;
        let err = svc.create(Reward::new(user.id, "  ")).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationFailed(_)));
    }
}

//! Quest completion orchestration.
//!
//! Completing a quest is the one multi-entity write in the system: it flips
//! the quest, advances the user's XP/level/streak, rolls the category
//! aggregates, appends achievement records, and unlocks rewards. All of it
//! commits in a single SQLite transaction, so a failure anywhere leaves every
//! entity untouched.
//!
//! Completions for the same user are additionally serialized through a
//! per-user async lock, so two concurrent completions cannot both read the
//! same starting totals and lose one update.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::adapters::sqlite::{
    SqliteAchievementRepository, SqliteCategoryRepository, SqliteQuestRepository,
    SqliteRewardRepository, SqliteUserRepository,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Achievement, Quest, QuestStatus, Reward, User};
use crate::domain::progression::{
    earned_achievements, ProgressionCalculator, StreakPolicy, StreakTracker,
};

/// Everything one completion changed, returned to the caller for display.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionReceipt {
    /// The quest, now completed
    pub quest: Quest,
    /// The user with updated progression
    pub user: User,
    /// XP credited by this completion
    pub xp_gained: u32,
    /// Whether a level boundary was crossed
    pub leveled_up: bool,
    /// Achievements appended by this completion
    pub achievements: Vec<Achievement>,
    /// Rewards that transitioned from locked to unlocked
    pub unlocked_rewards: Vec<Reward>,
}

/// Runs the atomic quest-completion transaction.
pub struct QuestCompletionService {
    pool: SqlitePool,
    policy: StreakPolicy,
    user_locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl QuestCompletionService {
    pub fn new(pool: SqlitePool, policy: StreakPolicy) -> Self {
        Self {
            pool,
            policy,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Complete a quest, dated today.
    pub async fn complete_quest(&self, quest_id: Uuid) -> DomainResult<CompletionReceipt> {
        self.complete_quest_on(quest_id, Local::now().date_naive())
            .await
    }

    /// Complete a quest as of a given calendar date. The date only feeds the
    /// streak calculation; timestamps still record the actual instant.
    #[instrument(skip(self), fields(quest_id = %quest_id))]
    pub async fn complete_quest_on(
        &self,
        quest_id: Uuid,
        today: NaiveDate,
    ) -> DomainResult<CompletionReceipt> {
        // A cheap read outside the transaction to learn the owner, so the
        // per-user lock can be taken before any state is touched.
        let owner = SqliteQuestRepository::fetch(&self.pool, quest_id)
            .await?
            .ok_or(DomainError::QuestNotFound(quest_id))?
            .user_id;

        let _guard = self.lock_user(owner).await;

        let mut tx = self.pool.begin().await?;

        // Re-read inside the transaction; the pre-lock snapshot may be stale.
        let mut quest = SqliteQuestRepository::fetch(&mut *tx, quest_id)
            .await?
            .ok_or(DomainError::QuestNotFound(quest_id))?;

        if quest.status == QuestStatus::Completed {
            return Err(DomainError::QuestAlreadyCompleted {
                id: quest.id,
                status: quest.status.as_str().to_string(),
            });
        }
        quest
            .transition_to(QuestStatus::Completed)
            .map_err(|_| DomainError::InvalidStateTransition {
                from: quest.status.as_str().to_string(),
                to: QuestStatus::Completed.as_str().to_string(),
            })?;

        let mut user = SqliteUserRepository::fetch(&mut *tx, quest.user_id)
            .await?
            .ok_or(DomainError::UserNotFound(quest.user_id))?;

        let progression = ProgressionCalculator::advance(&user, quest.xp);
        let new_streak = StreakTracker::next(&user, today, self.policy);
        let achievements = earned_achievements(&user, progression, new_streak);

        user.level = progression.new_level;
        user.current_xp = progression.new_current_xp;
        user.total_xp = progression.new_total_xp;
        user.streak = new_streak;
        user.last_active_date = Some(today);

        SqliteQuestRepository::store(&mut *tx, &quest).await?;
        SqliteUserRepository::store(&mut *tx, &user).await?;

        // Category rollup: exact name match, silently skipped when no row
        // exists for the quest's category.
        match SqliteCategoryRepository::fetch_by_name(&mut *tx, user.id, &quest.category).await? {
            Some(mut category) => {
                category.record_completion(quest.xp);
                SqliteCategoryRepository::store(&mut *tx, &category).await?;
            }
            None => {
                debug!(category = %quest.category, "no category row; skipping rollup");
            }
        }

        for achievement in &achievements {
            SqliteAchievementRepository::insert(&mut *tx, achievement).await?;
        }

        let mut unlocked_rewards = Vec::new();
        for mut reward in SqliteRewardRepository::fetch_locked(&mut *tx, user.id).await? {
            if reward.threshold_met(user.total_xp, user.streak) {
                reward.unlocked = true;
                SqliteRewardRepository::store(&mut *tx, &reward).await?;
                unlocked_rewards.push(reward);
            }
        }

        tx.commit().await?;

        info!(
            quest = %quest.title,
            xp = quest.xp,
            level = user.level,
            streak = user.streak,
            leveled_up = progression.leveled_up,
            achievements = achievements.len(),
            rewards_unlocked = unlocked_rewards.len(),
            "quest completed"
        );

        Ok(CompletionReceipt {
            xp_gained: quest.xp,
            leveled_up: progression.leveled_up,
            quest,
            user,
            achievements,
            unlocked_rewards,
        })
    }

    async fn lock_user(&self, user_id: Uuid) -> tokio::sync::OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.user_locks.lock().await;
            locks.entry(user_id).or_default().clone()
        };
        lock.lock_owned().await
    }
}

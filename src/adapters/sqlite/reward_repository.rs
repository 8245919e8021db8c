//! SQLite implementation of the RewardRepository.

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool};
use uuid::Uuid;

use crate::adapters::sqlite::{parse_datetime, parse_uuid};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Reward;
use crate::domain::ports::RewardRepository;

#[derive(Clone)]
pub struct SqliteRewardRepository {
    pool: SqlitePool,
}

impl SqliteRewardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch a user's still-locked rewards through any executor, so the
    /// completion transaction can evaluate unlock thresholds in place.
    pub async fn fetch_locked<'e, E>(executor: E, user_id: Uuid) -> DomainResult<Vec<Reward>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<RewardRow> =
            sqlx::query_as("SELECT * FROM rewards WHERE user_id = ? AND unlocked = 0")
                .bind(user_id.to_string())
                .fetch_all(executor)
                .await?;
        rows.into_iter().map(Reward::try_from).collect()
    }

    /// Persist a reward's mutable fields through any executor.
    pub async fn store<'e, E>(executor: E, reward: &Reward) -> DomainResult<()>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"UPDATE rewards SET title = ?, description = ?, icon = ?, xp_required = ?,
               streak_required = ?, unlocked = ?, claimed = ?
               WHERE id = ?"#,
        )
        .bind(&reward.title)
        .bind(&reward.description)
        .bind(&reward.icon)
        .bind(reward.xp_required.map(i64::from))
        .bind(reward.streak_required.map(i64::from))
        .bind(reward.unlocked)
        .bind(reward.claimed)
        .bind(reward.id.to_string())
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RewardNotFound(reward.id));
        }
        Ok(())
    }
}

#[async_trait]
impl RewardRepository for SqliteRewardRepository {
    async fn create(&self, reward: &Reward) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT INTO rewards (id, user_id, title, description, icon, xp_required,
               streak_required, unlocked, claimed, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(reward.id.to_string())
        .bind(reward.user_id.to_string())
        .bind(&reward.title)
        .bind(&reward.description)
        .bind(&reward.icon)
        .bind(reward.xp_required.map(i64::from))
        .bind(reward.streak_required.map(i64::from))
        .bind(reward.unlocked)
        .bind(reward.claimed)
        .bind(reward.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<Reward>> {
        let row: Option<RewardRow> = sqlx::query_as("SELECT * FROM rewards WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Reward::try_from).transpose()
    }

    async fn update(&self, reward: &Reward) -> DomainResult<()> {
        Self::store(&self.pool, reward).await
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM rewards WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RewardNotFound(id));
        }
        Ok(())
    }

    async fn list_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Reward>> {
        let rows: Vec<RewardRow> =
            sqlx::query_as("SELECT * FROM rewards WHERE user_id = ? ORDER BY created_at")
                .bind(user_id.to_string())
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(Reward::try_from).collect()
    }
}

#[derive(sqlx::FromRow)]
struct RewardRow {
    id: String,
    user_id: String,
    title: String,
    description: Option<String>,
    icon: String,
    xp_required: Option<i64>,
    streak_required: Option<i64>,
    unlocked: bool,
    claimed: bool,
    created_at: String,
}

impl TryFrom<RewardRow> for Reward {
    type Error = DomainError;

    fn try_from(row: RewardRow) -> Result<Self, Self::Error> {
        Ok(Reward {
            id: parse_uuid(&row.id)?,
            user_id: parse_uuid(&row.user_id)?,
            title: row.title,
            description: row.description,
            icon: row.icon,
            xp_required: row.xp_required.map(|v| v as u32),
            streak_required: row.streak_required.map(|v| v as u32),
            unlocked: row.unlocked,
            claimed: row.claimed,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;
    use crate::adapters::sqlite::user_repository::SqliteUserRepository;
    use crate::domain::models::User;
    use crate::domain::ports::UserRepository;

    async fn setup() -> (SqliteRewardRepository, User) {
        let pool = create_migrated_test_pool().await.unwrap();
        let user = User::new("alex");
        SqliteUserRepository::new(pool.clone())
            .create(&user)
            .await
            .unwrap();
        (SqliteRewardRepository::new(pool), user)
    }

    #[tokio::test]
    async fn test_create_and_get_reward() {
        let (repo, user) = setup().await;
        let reward = Reward::new(user.id, "Movie Night")
            .with_icon("🎬")
            .with_streak_required(3);

        repo.create(&reward).await.unwrap();

        let retrieved = repo.get(reward.id).await.unwrap().unwrap();
        assert_eq!(retrieved, reward);
    }

    #[tokio::test]
    async fn test_fetch_locked_excludes_unlocked() {
        let (repo, user) = setup().await;
        let locked = Reward::new(user.id, "Shopping Spree").with_xp_required(5000);
        let unlocked = Reward::new(user.id, "Game Time")
            .with_xp_required(100)
            .with_unlocked(true);

        repo.create(&locked).await.unwrap();
        repo.create(&unlocked).await.unwrap();

        let still_locked = SqliteRewardRepository::fetch_locked(&repo.pool, user.id)
            .await
            .unwrap();
        assert_eq!(still_locked.len(), 1);
        assert_eq!(still_locked[0].title, "Shopping Spree");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (repo, user) = setup().await;
        let mut reward = Reward::new(user.id, "Game Time").with_xp_required(100);
        repo.create(&reward).await.unwrap();

        reward.unlocked = true;
        reward.claimed = true;
        repo.update(&reward).await.unwrap();

        let retrieved = repo.get(reward.id).await.unwrap().unwrap();
        assert!(retrieved.unlocked);
        assert!(retrieved.claimed);

        repo.delete(reward.id).await.unwrap();
        let err = repo.delete(reward.id).await.unwrap_err();
        assert!(matches!(err, DomainError::RewardNotFound(_)));
    }
}

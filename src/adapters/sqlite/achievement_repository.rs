//! SQLite implementation of the AchievementRepository.
//!
//! The achievements table is an append-only log, so this adapter only
//! inserts and lists.

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool};
use uuid::Uuid;

use crate::adapters::sqlite::{parse_datetime, parse_uuid};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Achievement;
use crate::domain::ports::AchievementRepository;

#[derive(Clone)]
pub struct SqliteAchievementRepository {
    pool: SqlitePool,
}

impl SqliteAchievementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append an achievement through any executor, so the completion
    /// transaction can write milestones atomically with the rest.
    pub async fn insert<'e, E>(executor: E, achievement: &Achievement) -> DomainResult<()>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"INSERT INTO achievements (id, user_id, title, description, icon, xp_reward, unlocked_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(achievement.id.to_string())
        .bind(achievement.user_id.to_string())
        .bind(&achievement.title)
        .bind(&achievement.description)
        .bind(&achievement.icon)
        .bind(i64::from(achievement.xp_reward))
        .bind(achievement.unlocked_at.to_rfc3339())
        .execute(executor)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl AchievementRepository for SqliteAchievementRepository {
    async fn create(&self, achievement: &Achievement) -> DomainResult<()> {
        Self::insert(&self.pool, achievement).await
    }

    async fn list_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Achievement>> {
        let rows: Vec<AchievementRow> =
            sqlx::query_as("SELECT * FROM achievements WHERE user_id = ? ORDER BY unlocked_at DESC")
                .bind(user_id.to_string())
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(Achievement::try_from).collect()
    }
}

#[derive(sqlx::FromRow)]
struct AchievementRow {
    id: String,
    user_id: String,
    title: String,
    description: Option<String>,
    icon: String,
    xp_reward: i64,
    unlocked_at: String,
}

impl TryFrom<AchievementRow> for Achievement {
    type Error = DomainError;

    fn try_from(row: AchievementRow) -> Result<Self, Self::Error> {
        Ok(Achievement {
            id: parse_uuid(&row.id)?,
            user_id: parse_uuid(&row.user_id)?,
            title: row.title,
            description: row.description,
            icon: row.icon,
            xp_reward: row.xp_reward as u32,
            unlocked_at: parse_datetime(&row.unlocked_at)?,
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

    async fn setup() -> (SqliteAchievementRepository, User) {
        let pool = create_migrated_test_pool().await.unwrap();
        let user = User::new("alex");
        SqliteUserRepository::new(pool.clone())
            .create(&user)
            .await
            .unwrap();
        (SqliteAchievementRepository::new(pool), user)
    }

    #[tokio::test]
    async fn test_append_and_list() {
        let (repo, user) = setup().await;

        let level_up = Achievement::new(user.id, "Level Up!")
            .with_description("Reached level 2")
            .with_icon("⭐")
            .with_xp_reward(50);
        repo.create(&level_up).await.unwrap();

        let listed = repo.list_for_user(user.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], level_up);
    }
}

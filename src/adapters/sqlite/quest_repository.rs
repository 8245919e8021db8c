//! SQLite implementation of the QuestRepository.

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool};
use uuid::Uuid;

use crate::adapters::sqlite::{parse_datetime, parse_optional_datetime, parse_uuid};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Quest, QuestStatus};
use crate::domain::ports::{QuestFilter, QuestRepository};

#[derive(Clone)]
pub struct SqliteQuestRepository {
    pool: SqlitePool,
}

impl SqliteQuestRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch a quest through any executor, so the completion transaction can
    /// read inside its own connection.
    pub async fn fetch<'e, E>(executor: E, id: Uuid) -> DomainResult<Option<Quest>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let row: Option<QuestRow> = sqlx::query_as("SELECT * FROM quests WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(executor)
            .await?;
        row.map(Quest::try_from).transpose()
    }

    /// Persist a quest's mutable fields through any executor.
    pub async fn store<'e, E>(executor: E, quest: &Quest) -> DomainResult<()>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"UPDATE quests SET title = ?, description = ?, xp = ?, time_estimate = ?,
               category = ?, status = ?, completed_at = ?
               WHERE id = ?"#,
        )
        .bind(&quest.title)
        .bind(&quest.description)
        .bind(i64::from(quest.xp))
        .bind(&quest.time_estimate)
        .bind(&quest.category)
        .bind(quest.status.as_str())
        .bind(quest.completed_at.map(|t| t.to_rfc3339()))
        .bind(quest.id.to_string())
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::QuestNotFound(quest.id));
        }
        Ok(())
    }
}

#[async_trait]
impl QuestRepository for SqliteQuestRepository {
    async fn create(&self, quest: &Quest) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT INTO quests (id, user_id, title, description, xp, time_estimate,
               category, status, completed_at, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(quest.id.to_string())
        .bind(quest.user_id.to_string())
        .bind(&quest.title)
        .bind(&quest.description)
        .bind(i64::from(quest.xp))
        .bind(&quest.time_estimate)
        .bind(&quest.category)
        .bind(quest.status.as_str())
        .bind(quest.completed_at.map(|t| t.to_rfc3339()))
        .bind(quest.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<Quest>> {
        Self::fetch(&self.pool, id).await
    }

    async fn update(&self, quest: &Quest) -> DomainResult<()> {
        Self::store(&self.pool, quest).await
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM quests WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::QuestNotFound(id));
        }
        Ok(())
    }

    async fn list_for_user(&self, user_id: Uuid, filter: QuestFilter) -> DomainResult<Vec<Quest>> {
        let mut query = String::from("SELECT * FROM quests WHERE user_id = ?");
        let mut bindings: Vec<String> = vec![user_id.to_string()];

        if let Some(status) = &filter.status {
            query.push_str(" AND status = ?");
            bindings.push(status.as_str().to_string());
        }
        if let Some(category) = &filter.category {
            query.push_str(" AND category = ?");
            bindings.push(category.clone());
        }

        query.push_str(" ORDER BY created_at DESC");

        let mut q = sqlx::query_as::<_, QuestRow>(&query);
        for binding in &bindings {
            q = q.bind(binding);
        }

        let rows: Vec<QuestRow> = q.fetch_all(&self.pool).await?;
        rows.into_iter().map(Quest::try_from).collect()
    }
}

#[derive(sqlx::FromRow)]
struct QuestRow {
    id: String,
    user_id: String,
    title: String,
    description: Option<String>,
    xp: i64,
    time_estimate: Option<String>,
    category: String,
    status: String,
    completed_at: Option<String>,
    created_at: String,
}

impl TryFrom<QuestRow> for Quest {
    type Error = DomainError;

    fn try_from(row: QuestRow) -> Result<Self, Self::Error> {
        let status = QuestStatus::from_str(&row.status).ok_or_else(|| {
            DomainError::SerializationError(format!("Invalid quest status: {}", row.status))
        })?;

        Ok(Quest {
            id: parse_uuid(&row.id)?,
            user_id: parse_uuid(&row.user_id)?,
            title: row.title,
            description: row.description,
            xp: row.xp as u32,
            time_estimate: row.time_estimate,
            category: row.category,
            status,
            completed_at: parse_optional_datetime(row.completed_at)?,
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

    async fn setup() -> (SqliteQuestRepository, User) {
        let pool = create_migrated_test_pool().await.unwrap();
        let user = User::new("alex");
        SqliteUserRepository::new(pool.clone())
            .create(&user)
            .await
            .unwrap();
        (SqliteQuestRepository::new(pool), user)
    }

    #[tokio::test]
    async fn test_create_and_get_quest() {
        let (repo, user) = setup().await;
        let quest = Quest::new(user.id, "Morning Meditation", "Health")
            .with_description("20 minutes of mindfulness practice")
            .with_time_estimate("20 min");

        repo.create(&quest).await.unwrap();

        let retrieved = repo.get(quest.id).await.unwrap().unwrap();
        assert_eq!(retrieved, quest);
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let (repo, user) = setup().await;

        let health = Quest::new(user.id, "Run", "Health");
        let mut work = Quest::new(user.id, "Ship Feature", "Work").with_xp(50);
        work.status = QuestStatus::Completed;

        repo.create(&health).await.unwrap();
        repo.create(&work).await.unwrap();

        let all = repo.list_for_user(user.id, QuestFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let active = repo
            .list_for_user(
                user.id,
                QuestFilter { status: Some(QuestStatus::Active), ..Default::default() },
            )
            .await
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "Run");

        let work_only = repo
            .list_for_user(
                user.id,
                QuestFilter { category: Some("Work".to_string()), ..Default::default() },
            )
            .await
            .unwrap();
        assert_eq!(work_only.len(), 1);
        assert_eq!(work_only[0].title, "Ship Feature");
    }

    #[tokio::test]
    async fn test_delete_quest() {
        let (repo, user) = setup().await;
        let quest = Quest::new(user.id, "Temp", "Personal");
        repo.create(&quest).await.unwrap();

        repo.delete(quest.id).await.unwrap();
        assert!(repo.get(quest.id).await.unwrap().is_none());

        let err = repo.delete(quest.id).await.unwrap_err();
        assert!(matches!(err, DomainError::QuestNotFound(_)));
    }
}

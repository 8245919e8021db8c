//! SQLite implementation of the UserRepository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Sqlite, SqlitePool};
use uuid::Uuid;

use crate::adapters::sqlite::{parse_datetime, parse_uuid};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::User;
use crate::domain::ports::UserRepository;

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch a user through any executor, so the completion transaction can
    /// read inside its own connection.
    pub async fn fetch<'e, E>(executor: E, id: Uuid) -> DomainResult<Option<User>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(executor)
            .await?;
        row.map(User::try_from).transpose()
    }

    /// Persist a user's progression fields through any executor.
    pub async fn store<'e, E>(executor: E, user: &User) -> DomainResult<()>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"UPDATE users SET username = ?, level = ?, current_xp = ?, total_xp = ?,
               streak = ?, last_active_date = ?
               WHERE id = ?"#,
        )
        .bind(&user.username)
        .bind(i64::from(user.level))
        .bind(i64::from(user.current_xp))
        .bind(i64::from(user.total_xp))
        .bind(i64::from(user.streak))
        .bind(user.last_active_date.map(|d| d.to_string()))
        .bind(user.id.to_string())
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(user.id));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT INTO users (id, username, level, current_xp, total_xp, streak,
               last_active_date, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(i64::from(user.level))
        .bind(i64::from(user.current_xp))
        .bind(i64::from(user.total_xp))
        .bind(i64::from(user.streak))
        .bind(user.last_active_date.map(|d| d.to_string()))
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<User>> {
        Self::fetch(&self.pool, id).await
    }

    async fn get_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn update(&self, user: &User) -> DomainResult<()> {
        Self::store(&self.pool, user).await
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as("SELECT * FROM users ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(User::try_from).collect()
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    username: String,
    level: i64,
    current_xp: i64,
    total_xp: i64,
    streak: i64,
    last_active_date: Option<String>,
    created_at: String,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let last_active_date = row
            .last_active_date
            .map(|s| s.parse::<NaiveDate>())
            .transpose()
            .map_err(|e| DomainError::SerializationError(e.to_string()))?;

        Ok(User {
            id: parse_uuid(&row.id)?,
            username: row.username,
            level: row.level as u32,
            current_xp: row.current_xp as u32,
            total_xp: row.total_xp as u32,
            streak: row.streak as u32,
            last_active_date,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

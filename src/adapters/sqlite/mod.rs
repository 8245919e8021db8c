//! SQLite persistence adapters.
//!
//! Each repository implements its domain port against a shared `SqlitePool`.
//! Repositories also expose executor-generic associated functions (`fetch`,
//! `store`, `insert`) so the quest-completion service can run every write of
//! one completion inside a single transaction.

pub mod achievement_repository;
pub mod category_repository;
pub mod connection;
pub mod migrations;
pub mod quest_repository;
pub mod reward_repository;
pub mod user_repository;

pub use achievement_repository::SqliteAchievementRepository;
pub use category_repository::SqliteCategoryRepository;
pub use connection::{create_pool, create_test_pool, ConnectionError, PoolConfig};
pub use migrations::{all_embedded_migrations, Migration, MigrationError, Migrator};
pub use quest_repository::SqliteQuestRepository;
pub use reward_repository::SqliteRewardRepository;
pub use user_repository::SqliteUserRepository;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),
}

/// Open a pool at `database_url` and bring the schema up to date.
pub async fn initialize_database(
    database_url: &str,
    pool_config: Option<PoolConfig>,
) -> Result<SqlitePool, DatabaseError> {
    let pool = create_pool(database_url, pool_config).await?;
    let migrator = Migrator::new(pool.clone());
    migrator
        .run_embedded_migrations(all_embedded_migrations())
        .await?;
    Ok(pool)
}

/// Open the project-local database at `.questlog/questlog.db`.
pub async fn initialize_default_database() -> Result<SqlitePool, DatabaseError> {
    initialize_database("sqlite:.questlog/questlog.db", None).await
}

/// In-memory pool with all migrations applied, for tests.
pub async fn create_migrated_test_pool() -> Result<SqlitePool, DatabaseError> {
    let pool = create_test_pool().await?;
    let migrator = Migrator::new(pool.clone());
    migrator
        .run_embedded_migrations(all_embedded_migrations())
        .await?;
    Ok(pool)
}

pub(crate) fn parse_uuid(s: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(s).map_err(|e| DomainError::SerializationError(format!("Invalid UUID: {e}")))
}

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DomainError::SerializationError(format!("Invalid timestamp: {e}")))
}

pub(crate) fn parse_optional_datetime(
    s: Option<String>,
) -> Result<Option<DateTime<Utc>>, DomainError> {
    s.map(|s| parse_datetime(&s)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrated_pool_has_schema() {
        let pool = create_migrated_test_pool().await.unwrap();
        let migrator = Migrator::new(pool.clone());
        assert_eq!(migrator.get_current_version().await.unwrap(), 1);

        // Re-running is a no-op.
        let applied = migrator
            .run_embedded_migrations(all_embedded_migrations())
            .await
            .unwrap();
        assert_eq!(applied, 0);
    }

    #[test]
    fn test_parse_helpers() {
        assert!(parse_uuid("not-a-uuid").is_err());
        assert!(parse_datetime("2025-06-10T12:00:00+00:00").is_ok());
        assert!(parse_optional_datetime(None).unwrap().is_none());
    }
}

//! SQLite implementation of the CategoryRepository.

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool};
use uuid::Uuid;

use crate::adapters::sqlite::parse_uuid;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Category;
use crate::domain::ports::CategoryRepository;

#[derive(Clone)]
pub struct SqliteCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Look up a user's category by exact name through any executor.
    pub async fn fetch_by_name<'e, E>(
        executor: E,
        user_id: Uuid,
        name: &str,
    ) -> DomainResult<Option<Category>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let row: Option<CategoryRow> =
            sqlx::query_as("SELECT * FROM categories WHERE user_id = ? AND name = ?")
                .bind(user_id.to_string())
                .bind(name)
                .fetch_optional(executor)
                .await?;
        row.map(Category::try_from).transpose()
    }

    /// Persist a category's totals through any executor.
    pub async fn store<'e, E>(executor: E, category: &Category) -> DomainResult<()>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE categories SET name = ?, color = ?, total_xp = ?, quest_count = ? WHERE id = ?",
        )
        .bind(&category.name)
        .bind(&category.color)
        .bind(i64::from(category.total_xp))
        .bind(i64::from(category.quest_count))
        .bind(category.id.to_string())
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CategoryNotFound(category.id));
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    async fn create(&self, category: &Category) -> DomainResult<()> {
        let result = sqlx::query(
            "INSERT INTO categories (id, user_id, name, color, total_xp, quest_count)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(category.id.to_string())
        .bind(category.user_id.to_string())
        .bind(&category.name)
        .bind(&category.color)
        .bind(i64::from(category.total_xp))
        .bind(i64::from(category.quest_count))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(DomainError::DuplicateCategory(category.name.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<Category>> {
        let row: Option<CategoryRow> = sqlx::query_as("SELECT * FROM categories WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Category::try_from).transpose()
    }

    async fn get_by_name(&self, user_id: Uuid, name: &str) -> DomainResult<Option<Category>> {
        Self::fetch_by_name(&self.pool, user_id, name).await
    }

    async fn update(&self, category: &Category) -> DomainResult<()> {
        Self::store(&self.pool, category).await
    }

    async fn list_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Category>> {
        let rows: Vec<CategoryRow> =
            sqlx::query_as("SELECT * FROM categories WHERE user_id = ? ORDER BY name")
                .bind(user_id.to_string())
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(Category::try_from).collect()
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: String,
    user_id: String,
    name: String,
    color: String,
    total_xp: i64,
    quest_count: i64,
}

impl TryFrom<CategoryRow> for Category {
    type Error = DomainError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Category {
            id: parse_uuid(&row.id)?,
            user_id: parse_uuid(&row.user_id)?,
            name: row.name,
            color: row.color,
            total_xp: row.total_xp as u32,
            quest_count: row.quest_count as u32,
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

    async fn setup() -> (SqliteCategoryRepository, User) {
        let pool = create_migrated_test_pool().await.unwrap();
        let user = User::new("alex");
        SqliteUserRepository::new(pool.clone())
            .create(&user)
            .await
            .unwrap();
        (SqliteCategoryRepository::new(pool), user)
    }

    #[tokio::test]
    async fn test_create_and_get_by_name() {
        let (repo, user) = setup().await;
        let category = Category::new(user.id, "Health", "chart-1");
        repo.create(&category).await.unwrap();

        let found = repo.get_by_name(user.id, "Health").await.unwrap().unwrap();
        assert_eq!(found, category);

        // Name lookup is exact; no case folding.
        assert!(repo.get_by_name(user.id, "health").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let (repo, user) = setup().await;
        repo.create(&Category::new(user.id, "Work", "chart-2"))
            .await
            .unwrap();

        let err = repo
            .create(&Category::new(user.id, "Work", "chart-3"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateCategory(name) if name == "Work"));
    }

    #[tokio::test]
    async fn test_update_totals() {
        let (repo, user) = setup().await;
        let mut category = Category::new(user.id, "Study", "chart-4");
        repo.create(&category).await.unwrap();

        category.record_completion(35);
        repo.update(&category).await.unwrap();

        let found = repo.get(category.id).await.unwrap().unwrap();
        assert_eq!(found.total_xp, 35);
        assert_eq!(found.quest_count, 1);
    }
}

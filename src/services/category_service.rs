//! Category CRUD.
//!
//! Aggregate rollups are written by the completion service; this service
//! only manages the rows themselves.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Category;
use crate::domain::ports::CategoryRepository;

pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn create(&self, category: Category) -> DomainResult<Category> {
        category.validate().map_err(DomainError::ValidationFailed)?;
        self.categories.create(&category).await?;
        Ok(category)
    }

    pub async fn get_by_name(&self, user_id: Uuid, name: &str) -> DomainResult<Option<Category>> {
        self.categories.get_by_name(user_id, name).await
    }

    pub async fn list(&self, user_id: Uuid) -> DomainResult<Vec<Category>> {
        self.categories.list_for_user(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{
        create_migrated_test_pool, SqliteCategoryRepository, SqliteUserRepository,
    };
    use crate::domain::models::User;
    use crate::domain::ports::UserRepository;

    async fn setup() -> (CategoryService, User) {
        let pool = create_migrated_test_pool().await.unwrap();
        let user = User::new("alex");
        SqliteUserRepository::new(pool.clone())
            .create(&user)
            .await
            .unwrap();
        let svc = CategoryService::new(Arc::new(SqliteCategoryRepository::new(pool)));
        (svc, user)
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (svc, user) = setup().await;
        svc.create(Category::new(user.id, "Health", "chart-1"))
            .await
            .unwrap();
        svc.create(Category::new(user.id, "Work", "chart-2"))
            .await
            .unwrap();

        let listed = svc.list(user.id).await.unwrap();
        assert_eq!(listed.len(), 2);

        let err = svc
            .create(Category::new(user.id, "Health", "chart-3"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateCategory(_)));
    }
}

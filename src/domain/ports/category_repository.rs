use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::Category;

/// Repository port for category aggregate persistence.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a new category row.
    async fn create(&self, category: &Category) -> DomainResult<()>;

    /// Get a category by ID.
    async fn get(&self, id: Uuid) -> DomainResult<Option<Category>>;

    /// Look up a user's category by exact name match.
    async fn get_by_name(&self, user_id: Uuid, name: &str) -> DomainResult<Option<Category>>;

    /// Update an existing category. Fails with `CategoryNotFound` if missing.
    async fn update(&self, category: &Category) -> DomainResult<()>;

    /// List all of a user's categories.
    async fn list_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Category>>;
}

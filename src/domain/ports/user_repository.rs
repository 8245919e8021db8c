use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::User;

/// Repository port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    async fn create(&self, user: &User) -> DomainResult<()>;

    /// Get a user by ID.
    async fn get(&self, id: Uuid) -> DomainResult<Option<User>>;

    /// Get a user by username.
    async fn get_by_username(&self, username: &str) -> DomainResult<Option<User>>;

    /// Update an existing user. Fails with `UserNotFound` if missing.
    async fn update(&self, user: &User) -> DomainResult<()>;

    /// List all users.
    async fn list(&self) -> DomainResult<Vec<User>>;
}

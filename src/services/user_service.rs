//! User registration and lookup.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::User;
use crate::domain::ports::UserRepository;

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Register a new user with a unique username.
    pub async fn register(&self, username: &str) -> DomainResult<User> {
        let user = User::new(username);
        user.validate().map_err(DomainError::ValidationFailed)?;

        if self.users.get_by_username(username).await?.is_some() {
            return Err(DomainError::UsernameTaken(username.to_string()));
        }

        self.users.create(&user).await?;
        Ok(user)
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<User> {
        self.users
            .get(id)
            .await?
            .ok_or(DomainError::UserNotFound(id))
    }

    pub async fn get_by_username(&self, username: &str) -> DomainResult<User> {
        self.users
            .get_by_username(username)
            .await?
            .ok_or_else(|| DomainError::UsernameNotFound(username.to_string()))
    }

    pub async fn update(&self, user: &User) -> DomainResult<()> {
        user.validate().map_err(DomainError::ValidationFailed)?;
        self.users.update(user).await
    }

    pub async fn list(&self) -> DomainResult<Vec<User>> {
        self.users.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteUserRepository};

    async fn service() -> UserService {
        let pool = create_migrated_test_pool().await.unwrap();
        UserService::new(Arc::new(SqliteUserRepository::new(pool)))
    }

    #[tokio::test]
    async fn test_register_and_lookup() {
        let svc = service().await;
        let user = svc.register("Alex the Warrior").await.unwrap();

        let by_name = svc.get_by_username("Alex the Warrior").await.unwrap();
        assert_eq!(by_name.id, user.id);
        assert_eq!(svc.get(user.id).await.unwrap().username, "Alex the Warrior");
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let svc = service().await;
        svc.register("alex").await.unwrap();

        let err = svc.register("alex").await.unwrap_err();
        assert!(matches!(err, DomainError::UsernameTaken(_)));
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_blank_username_rejected() {
        let svc = service().await;
        let err = svc.register("   ").await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationFailed(_)));
    }

    #[tokio::test]
    async fn test_unknown_username_not_found() {
        let svc = service().await;
        let err = svc.get_by_username("nobody").await.unwrap_err();
        assert!(err.is_not_found());
    }
}

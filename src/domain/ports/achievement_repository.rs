use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::Achievement;

/// Repository port for the append-only achievement log.
///
/// There is deliberately no update or delete: achievements are immutable
/// once written.
#[async_trait]
pub trait AchievementRepository: Send + Sync {
    /// Append a new achievement record.
    async fn create(&self, achievement: &Achievement) -> DomainResult<()>;

    /// List a user's achievements, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Achievement>>;
}

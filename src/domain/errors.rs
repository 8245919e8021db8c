//! Domain errors for the Questlog system.

use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors that can occur in the Questlog system.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("No user with username: {0}")]
    UsernameNotFound(String),

    #[error("Quest not found: {0}")]
    QuestNotFound(Uuid),

    #[error("Reward not found: {0}")]
    RewardNotFound(Uuid),

    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Quest {id} is already {status} and cannot be completed again")]
    QuestAlreadyCompleted { id: Uuid, status: String },

    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Reward {0} is still locked")]
    RewardLocked(Uuid),

    #[error("Reward {0} has already been claimed")]
    RewardAlreadyClaimed(Uuid),

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Category already exists for this user: {0}")]
    DuplicateCategory(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Whether this error means a requested record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::UsernameNotFound(_)
                | Self::QuestNotFound(_)
                | Self::RewardNotFound(_)
                | Self::CategoryNotFound(_)
        )
    }

    /// Whether this error is a conflict with existing state (a completion
    /// replay, a claim on a locked or spent reward, a duplicate name).
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::QuestAlreadyCompleted { .. }
                | Self::InvalidStateTransition { .. }
                | Self::RewardLocked(_)
                | Self::RewardAlreadyClaimed(_)
                | Self::UsernameTaken(_)
                | Self::DuplicateCategory(_)
        )
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces the storage adapters must implement, one per
//! entity. The domain and services depend only on these contracts, never on
//! a concrete backend.

pub mod achievement_repository;
pub mod category_repository;
pub mod quest_repository;
pub mod reward_repository;
pub mod user_repository;

pub use achievement_repository::AchievementRepository;
pub use category_repository::CategoryRepository;
pub use quest_repository::{QuestFilter, QuestRepository};
pub use reward_repository::RewardRepository;
pub use user_repository::UserRepository;

pub mod achievement;
pub mod category;
pub mod config;
pub mod quest;
pub mod reward;
pub mod user;

pub use achievement::{Achievement, DEFAULT_ACHIEVEMENT_ICON};
pub use category::Category;
pub use config::{Config, DatabaseConfig, LoggingConfig, ProgressionConfig};
pub use quest::{Quest, QuestStatus, DEFAULT_QUEST_XP};
pub use reward::{Reward, DEFAULT_REWARD_ICON};
pub use user::User;

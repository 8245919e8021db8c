//! Business logic services over the domain ports.

pub mod category_service;
pub mod completion;
pub mod quest_service;
pub mod reward_service;
pub mod seed;
pub mod user_service;

pub use category_service::CategoryService;
pub use completion::{CompletionReceipt, QuestCompletionService};
pub use quest_service::{QuestService, QuestUpdate};
pub use reward_service::RewardService;
pub use seed::seed_demo_data;
pub use user_service::UserService;

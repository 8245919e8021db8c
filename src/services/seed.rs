//! Demo data seeding for a fresh database.

use sqlx::SqlitePool;
use tracing::info;

use crate::adapters::sqlite::{
    SqliteAchievementRepository, SqliteCategoryRepository, SqliteQuestRepository,
    SqliteRewardRepository, SqliteUserRepository,
};
use crate::domain::errors::DomainResult;
use crate::domain::models::{Achievement, Category, Quest, Reward, User};
use crate::domain::ports::{
    AchievementRepository, CategoryRepository, QuestRepository, RewardRepository, UserRepository,
};

pub const DEMO_USERNAME: &str = "Alex the Warrior";

/// Populate a demo user with categories, starter quests, rewards, and a bit
/// of history. Idempotent: if the demo user already exists, returns it
/// without writing anything.
pub async fn seed_demo_data(pool: &SqlitePool) -> DomainResult<User> {
    let users = SqliteUserRepository::new(pool.clone());
    if let Some(existing) = users.get_by_username(DEMO_USERNAME).await? {
        return Ok(existing);
    }

    let user = User::new(DEMO_USERNAME)
        .with_progress(5, 200, 2200)
        .with_streak(7, None);
    users.create(&user).await?;

    let categories = SqliteCategoryRepository::new(pool.clone());
    let seeded_categories = [
        Category::new(user.id, "Health", "chart-1").with_totals(340, 12),
        Category::new(user.id, "Work", "chart-2").with_totals(580, 9),
        Category::new(user.id, "Personal", "chart-3").with_totals(220, 8),
        Category::new(user.id, "Study", "chart-4").with_totals(410, 7),
    ];
    for category in &seeded_categories {
        categories.create(category).await?;
    }

    let quests = SqliteQuestRepository::new(pool.clone());
    let starter_quests = [
        Quest::new(user.id, "Morning Meditation", "Health")
            .with_description("20 minutes of mindfulness practice")
            .with_xp(20)
            .with_time_estimate("20 min"),
        Quest::new(user.id, "Finish Project Report", "Work")
            .with_description("Complete the quarterly summary")
            .with_xp(50)
            .with_time_estimate("2 hours"),
        Quest::new(user.id, "Read 30 Pages", "Study")
            .with_description("Continue the current book")
            .with_xp(30)
            .with_time_estimate("45 min"),
    ];
    for quest in &starter_quests {
        quests.create(quest).await?;
    }

    let rewards = SqliteRewardRepository::new(pool.clone());
    let seeded_rewards = [
        Reward::new(user.id, "Game Time")
            .with_description("One hour of guilt-free gaming")
            .with_icon("🎮")
            .with_xp_required(100)
            .with_unlocked(true),
        Reward::new(user.id, "Movie Night")
            .with_description("Pick any movie, no vetoes")
            .with_icon("🎬")
            .with_streak_required(3)
            .with_unlocked(true),
        Reward::new(user.id, "Shopping Spree")
            .with_description("Treat yourself to something nice")
            .with_icon("🛍️")
            .with_xp_required(5000),
    ];
    for reward in &seeded_rewards {
        rewards.create(reward).await?;
    }

    let achievements = SqliteAchievementRepository::new(pool.clone());
    let seeded_achievements = [
        Achievement::new(user.id, "Streak Master")
            .with_description("Maintained 7 day streak")
            .with_icon("🔥")
            .with_xp_reward(100),
        Achievement::new(user.id, "Health Warrior")
            .with_description("Completed 10 health quests")
            .with_icon("💪")
            .with_xp_reward(75),
    ];
    for achievement in &seeded_achievements {
        achievements.create(achievement).await?;
    }

    info!(username = DEMO_USERNAME, "seeded demo data");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let pool = create_migrated_test_pool().await.unwrap();

        let first = seed_demo_data(&pool).await.unwrap();
        assert_eq!(first.username, DEMO_USERNAME);
        assert!(first.progression_consistent());

        let second = seed_demo_data(&pool).await.unwrap();
        assert_eq!(second.id, first.id);

        let categories = SqliteCategoryRepository::new(pool.clone())
            .list_for_user(first.id)
            .await
            .unwrap();
        assert_eq!(categories.len(), 4);

        let rewards = SqliteRewardRepository::new(pool.clone())
            .list_for_user(first.id)
            .await
            .unwrap();
        assert_eq!(rewards.len(), 3);
    }
}

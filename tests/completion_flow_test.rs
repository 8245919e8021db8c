//! End-to-end completion flow tests over the service layer.

use std::sync::Arc;

use chrono::NaiveDate;

use questlog::adapters::sqlite::{
    create_migrated_test_pool, SqliteCategoryRepository, SqliteQuestRepository,
    SqliteRewardRepository, SqliteUserRepository,
};
use questlog::domain::models::{Category, Quest, QuestStatus, Reward};
use questlog::domain::ports::{CategoryRepository, QuestFilter};
use questlog::domain::progression::StreakPolicy;
use questlog::services::{
    CategoryService, QuestCompletionService, QuestService, RewardService, UserService,
};
use questlog::DomainError;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[tokio::test]
async fn test_full_progression_journey() {
    let pool = create_migrated_test_pool().await.unwrap();

    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let quests = Arc::new(SqliteQuestRepository::new(pool.clone()));
    let rewards = Arc::new(SqliteRewardRepository::new(pool.clone()));
    let categories = Arc::new(SqliteCategoryRepository::new(pool.clone()));

    let user_service = UserService::new(users.clone());
    let quest_service = QuestService::new(quests.clone(), users.clone());
    let reward_service = RewardService::new(rewards.clone());
    let category_service = CategoryService::new(categories.clone());
    let completion = QuestCompletionService::new(pool.clone(), StreakPolicy::default());

    let user = user_service.register("alex").await.unwrap();

    category_service
        .create(Category::new(user.id, "Health", "chart-1"))
        .await
        .unwrap();

    let reward = reward_service
        .create(Reward::new(user.id, "Game Time").with_xp_required(500))
        .await
        .unwrap();

    // Day one: 480 XP across two quests. Not enough to level or unlock.
    let q1 = quest_service
        .create(Quest::new(user.id, "Big Workout", "Health").with_xp(400))
        .await
        .unwrap();
    let q2 = quest_service
        .create(Quest::new(user.id, "Stretch", "Health").with_xp(80))
        .await
        .unwrap();

    let day_one = date("2025-06-10");
    completion.complete_quest_on(q1.id, day_one).await.unwrap();
    let receipt = completion.complete_quest_on(q2.id, day_one).await.unwrap();

    assert_eq!(receipt.user.total_xp, 480);
    assert_eq!(receipt.user.level, 1);
    assert_eq!(receipt.user.streak, 1);
    assert!(!receipt.leveled_up);
    assert!(receipt.unlocked_rewards.is_empty());

    // Day two: 40 more XP crosses the level boundary and the reward
    // threshold in the same transaction.
    let q3 = quest_service
        .create(Quest::new(user.id, "Morning Run", "Health").with_xp(40))
        .await
        .unwrap();
    let receipt = completion
        .complete_quest_on(q3.id, date("2025-06-11"))
        .await
        .unwrap();

    assert!(receipt.leveled_up);
    assert_eq!(receipt.user.level, 2);
    assert_eq!(receipt.user.current_xp, 20);
    assert_eq!(receipt.user.total_xp, 520);
    assert_eq!(receipt.user.streak, 2);
    assert_eq!(receipt.achievements.len(), 1);
    assert_eq!(receipt.achievements[0].title, "Level Up!");
    assert_eq!(
        receipt.achievements[0].description.as_deref(),
        Some("Reached level 2")
    );
    assert_eq!(receipt.unlocked_rewards.len(), 1);
    assert_eq!(receipt.unlocked_rewards[0].id, reward.id);

    // Category aggregates saw all three completions.
    let health = category_service
        .get_by_name(user.id, "Health")
        .await
        .unwrap()
        .unwrap();
    assert_eq!((health.total_xp, health.quest_count), (520, 3));

    // The reward can now be claimed exactly once.
    let claimed = reward_service.claim(reward.id).await.unwrap();
    assert!(claimed.claimed);
    let err = reward_service.claim(reward.id).await.unwrap_err();
    assert!(matches!(err, DomainError::RewardAlreadyClaimed(_)));

    // Quest listings reflect the terminal states.
    let completed = quest_service
        .list(
            user.id,
            QuestFilter {
                status: Some(QuestStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(completed.len(), 3);
}

#[tokio::test]
async fn test_failed_completion_leaves_no_partial_state() {
    let pool = create_migrated_test_pool().await.unwrap();
    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let user_service = UserService::new(users.clone());
    let quest_service = QuestService::new(
        Arc::new(SqliteQuestRepository::new(pool.clone())),
        users.clone(),
    );
    let completion = QuestCompletionService::new(pool.clone(), StreakPolicy::default());

    let user = user_service.register("alex").await.unwrap();
    let quest = quest_service
        .create(Quest::new(user.id, "Run", "Health").with_xp(30))
        .await
        .unwrap();

    completion
        .complete_quest_on(quest.id, date("2025-06-10"))
        .await
        .unwrap();

    // The replay is rejected and nothing moves: not the user, not the quest.
    let err = completion
        .complete_quest_on(quest.id, date("2025-06-11"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::QuestAlreadyCompleted { .. }));

    let stored_user = user_service.get(user.id).await.unwrap();
    assert_eq!(stored_user.total_xp, 30);
    assert_eq!(stored_user.streak, 1);
    assert_eq!(stored_user.last_active_date, Some(date("2025-06-10")));
}

#[tokio::test]
async fn test_streak_milestones_across_a_week() {
    let pool = create_migrated_test_pool().await.unwrap();
    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let user_service = UserService::new(users.clone());
    let quest_service = QuestService::new(
        Arc::new(SqliteQuestRepository::new(pool.clone())),
        users.clone(),
    );
    let completion = QuestCompletionService::new(pool.clone(), StreakPolicy::default());

    let user = user_service.register("alex").await.unwrap();

    let mut milestone_count = 0;
    for day in 1..=7 {
        let quest = quest_service
            .create(Quest::new(user.id, format!("Day {day}"), "Health").with_xp(10))
            .await
            .unwrap();
        let today = date(&format!("2025-06-{day:02}"));
        let receipt = completion.complete_quest_on(quest.id, today).await.unwrap();
        assert_eq!(receipt.user.streak, day);
        milestone_count += receipt
            .achievements
            .iter()
            .filter(|a| a.title == "Streak Master")
            .count();
    }

    // Exactly one milestone for the whole week, on day seven.
    assert_eq!(milestone_count, 1);
    let stored = user_service.get(user.id).await.unwrap();
    assert_eq!(stored.streak, 7);
}

//! Achievement CLI commands. The achievement log is read-only.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::sync::Arc;

use crate::adapters::sqlite::{SqliteAchievementRepository, SqliteUserRepository};
use crate::cli::open_database;
use crate::cli::output::{output, CommandOutput};
use crate::cli::table::TableFormatter;
use crate::domain::models::Achievement;
use crate::domain::ports::AchievementRepository;
use crate::services::UserService;

#[derive(Args, Debug)]
pub struct AchievementArgs {
    #[command(subcommand)]
    pub command: AchievementCommands,
}

#[derive(Subcommand, Debug)]
pub enum AchievementCommands {
    /// List a user's achievements, newest first
    List {
        /// Owning username
        #[arg(short, long)]
        user: String,
    },
}

#[derive(Debug, serde::Serialize)]
pub struct AchievementOutput {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub icon: String,
    pub xp_reward: u32,
    pub unlocked_at: String,
}

impl From<&Achievement> for AchievementOutput {
    fn from(achievement: &Achievement) -> Self {
        Self {
            id: achievement.id.to_string(),
            title: achievement.title.clone(),
            description: achievement.description.clone(),
            icon: achievement.icon.clone(),
            xp_reward: achievement.xp_reward,
            unlocked_at: achievement.unlocked_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct AchievementListOutput {
    pub achievements: Vec<AchievementOutput>,
    pub total: usize,
    #[serde(skip)]
    table: String,
}

impl CommandOutput for AchievementListOutput {
    fn to_human(&self) -> String {
        if self.achievements.is_empty() {
            return "No achievements yet. Complete some quests!".to_string();
        }
        self.table.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: AchievementArgs, json_mode: bool) -> Result<()> {
    let (pool, _config) = open_database().await?;
    let user_service = UserService::new(Arc::new(SqliteUserRepository::new(pool.clone())));
    let achievements = SqliteAchievementRepository::new(pool);

    match args.command {
        AchievementCommands::List { user } => {
            let owner = user_service.get_by_username(&user).await?;
            let listed = achievements.list_for_user(owner.id).await?;
            let out = AchievementListOutput {
                total: listed.len(),
                table: TableFormatter::new().format_achievements(&listed),
                achievements: listed.iter().map(AchievementOutput::from).collect(),
            };
            output(&out, json_mode);
        }
    }

    Ok(())
}

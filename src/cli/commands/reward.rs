//! Reward CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::sync::Arc;

use crate::adapters::sqlite::{SqliteRewardRepository, SqliteUserRepository};
use crate::cli::id_resolver::resolve_reward_id;
use crate::cli::open_database;
use crate::cli::output::{output, CommandOutput};
use crate::cli::table::TableFormatter;
use crate::domain::models::Reward;
use crate::services::{RewardService, UserService};

#[derive(Args, Debug)]
pub struct RewardArgs {
    #[command(subcommand)]
    pub command: RewardCommands,
}

#[derive(Subcommand, Debug)]
pub enum RewardCommands {
    /// Add a new reward
    Add {
        /// Owning username
        #[arg(short, long)]
        user: String,
        /// Reward title
        title: String,
        /// Longer description
        #[arg(short, long)]
        description: Option<String>,
        /// Display icon
        #[arg(short, long)]
        icon: Option<String>,
        /// Total XP required to unlock
        #[arg(short, long)]
        xp_required: Option<u32>,
        /// Streak length required to unlock
        #[arg(short, long)]
        streak_required: Option<u32>,
    },
    /// List rewards
    List {
        /// Owning username
        #[arg(short, long)]
        user: String,
    },
    /// Claim an unlocked reward
    Claim {
        /// Reward ID (or unique prefix)
        id: String,
    },
    /// Delete a reward
    Delete {
        /// Reward ID (or unique prefix)
        id: String,
    },
}

#[derive(Debug, serde::Serialize)]
pub struct RewardOutput {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub icon: String,
    pub xp_required: Option<u32>,
    pub streak_required: Option<u32>,
    pub unlocked: bool,
    pub claimed: bool,
}

impl From<&Reward> for RewardOutput {
    fn from(reward: &Reward) -> Self {
        Self {
            id: reward.id.to_string(),
            title: reward.title.clone(),
            description: reward.description.clone(),
            icon: reward.icon.clone(),
            xp_required: reward.xp_required,
            streak_required: reward.streak_required,
            unlocked: reward.unlocked,
            claimed: reward.claimed,
        }
    }
}

impl CommandOutput for RewardOutput {
    fn to_human(&self) -> String {
        let state = if self.claimed {
            "claimed"
        } else if self.unlocked {
            "unlocked"
        } else {
            "locked"
        };
        let mut lines = vec![
            format!("{} {} ({state})", self.icon, self.title),
            format!("ID: {}", self.id),
        ];
        if let Some(description) = &self.description {
            lines.push(format!("Description: {description}"));
        }
        if let Some(xp) = self.xp_required {
            lines.push(format!("Requires: {xp} total XP"));
        }
        if let Some(streak) = self.streak_required {
            lines.push(format!("Requires: {streak} day streak"));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct RewardListOutput {
    pub rewards: Vec<RewardOutput>,
    pub total: usize,
    #[serde(skip)]
    table: String,
}

impl CommandOutput for RewardListOutput {
    fn to_human(&self) -> String {
        if self.rewards.is_empty() {
            return "No rewards found.".to_string();
        }
        self.table.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: RewardArgs, json_mode: bool) -> Result<()> {
    let (pool, _config) = open_database().await?;
    let user_service = UserService::new(Arc::new(SqliteUserRepository::new(pool.clone())));
    let service = RewardService::new(Arc::new(SqliteRewardRepository::new(pool.clone())));

    match args.command {
        RewardCommands::Add {
            user,
            title,
            description,
            icon,
            xp_required,
            streak_required,
        } => {
            let owner = user_service.get_by_username(&user).await?;
            let mut reward = Reward::new(owner.id, title);
            if let Some(description) = description {
                reward = reward.with_description(description);
            }
            if let Some(icon) = icon {
                reward = reward.with_icon(icon);
            }
            if let Some(xp) = xp_required {
                reward = reward.with_xp_required(xp);
            }
            if let Some(streak) = streak_required {
                reward = reward.with_streak_required(streak);
            }
            let reward = service.create(reward).await?;
            output(&RewardOutput::from(&reward), json_mode);
        }

        RewardCommands::List { user } => {
            let owner = user_service.get_by_username(&user).await?;
            let listed = service.list(owner.id).await?;
            let out = RewardListOutput {
                total: listed.len(),
                table: TableFormatter::new().format_rewards(&listed),
                rewards: listed.iter().map(RewardOutput::from).collect(),
            };
            output(&out, json_mode);
        }

        RewardCommands::Claim { id } => {
            let uuid = resolve_reward_id(&pool, &id).await?;
            let reward = service.claim(uuid).await?;
            output(&RewardOutput::from(&reward), json_mode);
        }

        RewardCommands::Delete { id } => {
            let uuid = resolve_reward_id(&pool, &id).await?;
            service.delete(uuid).await?;
            if json_mode {
                println!(
                    "{}",
                    serde_json::json!({ "success": true, "deleted": uuid.to_string() })
                );
            } else {
                println!("Reward deleted: {uuid}");
            }
        }
    }

    Ok(())
}

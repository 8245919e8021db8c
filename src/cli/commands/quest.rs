//! Quest CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use std::sync::Arc;

use crate::cli::id_resolver::resolve_quest_id;
use crate::cli::open_database;
use crate::cli::output::{output, CommandOutput};
use crate::cli::table::TableFormatter;
use crate::adapters::sqlite::{SqliteQuestRepository, SqliteUserRepository};
use crate::domain::models::{Quest, QuestStatus};
use crate::domain::ports::QuestFilter;
use crate::domain::progression::{StreakPolicy, XP_PER_LEVEL};
use crate::services::{CompletionReceipt, QuestCompletionService, QuestService, QuestUpdate, UserService};

#[derive(Args, Debug)]
pub struct QuestArgs {
    #[command(subcommand)]
    pub command: QuestCommands,
}

#[derive(Subcommand, Debug)]
pub enum QuestCommands {
    /// Add a new quest
    Add {
        /// Owning username
        #[arg(short, long)]
        user: String,
        /// Quest title
        title: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Longer description
        #[arg(short, long)]
        description: Option<String>,
        /// XP payout (default 20)
        #[arg(short, long)]
        xp: Option<u32>,
        /// Time estimate (e.g. "20 min")
        #[arg(short, long)]
        time_estimate: Option<String>,
    },
    /// List quests
    List {
        /// Owning username
        #[arg(short, long)]
        user: String,
        /// Filter by status (active, completed, archived)
        #[arg(short, long)]
        status: Option<String>,
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show quest details
    Show {
        /// Quest ID (or unique prefix)
        id: String,
    },
    /// Complete a quest, crediting XP and advancing progression
    Complete {
        /// Quest ID (or unique prefix)
        id: String,
    },
    /// Archive a quest without completing it
    Archive {
        /// Quest ID (or unique prefix)
        id: String,
    },
    /// Reactivate an archived quest
    Reactivate {
        /// Quest ID (or unique prefix)
        id: String,
    },
    /// Edit quest fields
    Update {
        /// Quest ID (or unique prefix)
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        xp: Option<u32>,
        #[arg(long)]
        time_estimate: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a quest
    Delete {
        /// Quest ID (or unique prefix)
        id: String,
    },
}

#[derive(Debug, serde::Serialize)]
pub struct QuestOutput {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub xp: u32,
    pub time_estimate: Option<String>,
    pub status: String,
    pub completed_at: Option<String>,
}

impl From<&Quest> for QuestOutput {
    fn from(quest: &Quest) -> Self {
        Self {
            id: quest.id.to_string(),
            title: quest.title.clone(),
            description: quest.description.clone(),
            category: quest.category.clone(),
            xp: quest.xp,
            time_estimate: quest.time_estimate.clone(),
            status: quest.status.as_str().to_string(),
            completed_at: quest.completed_at.map(|t| t.to_rfc3339()),
        }
    }
}

impl CommandOutput for QuestOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Quest: {}", self.title),
            format!("ID: {}", self.id),
            format!("Category: {}", self.category),
            format!("XP: {}", self.xp),
            format!("Status: {}", self.status),
        ];
        if let Some(description) = &self.description {
            lines.push(format!("Description: {description}"));
        }
        if let Some(estimate) = &self.time_estimate {
            lines.push(format!("Time estimate: {estimate}"));
        }
        if let Some(completed_at) = &self.completed_at {
            lines.push(format!("Completed: {completed_at}"));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct QuestListOutput {
    pub quests: Vec<QuestOutput>,
    pub total: usize,
    #[serde(skip)]
    table: String,
}

impl CommandOutput for QuestListOutput {
    fn to_human(&self) -> String {
        if self.quests.is_empty() {
            return "No quests found.".to_string();
        }
        self.table.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct CompletionOutput {
    pub quest: QuestOutput,
    pub xp_gained: u32,
    pub level: u32,
    pub current_xp: u32,
    pub total_xp: u32,
    pub streak: u32,
    pub leveled_up: bool,
    pub achievements: Vec<String>,
    pub unlocked_rewards: Vec<String>,
}

impl From<&CompletionReceipt> for CompletionOutput {
    fn from(receipt: &CompletionReceipt) -> Self {
        Self {
            quest: QuestOutput::from(&receipt.quest),
            xp_gained: receipt.xp_gained,
            level: receipt.user.level,
            current_xp: receipt.user.current_xp,
            total_xp: receipt.user.total_xp,
            streak: receipt.user.streak,
            leveled_up: receipt.leveled_up,
            achievements: receipt
                .achievements
                .iter()
                .map(|a| format!("{} {}", a.icon, a.title))
                .collect(),
            unlocked_rewards: receipt
                .unlocked_rewards
                .iter()
                .map(|r| format!("{} {}", r.icon, r.title))
                .collect(),
        }
    }
}

impl CommandOutput for CompletionOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Completed \"{}\" (+{} XP)",
            self.quest.title, self.xp_gained
        )];

        if self.leveled_up {
            lines.push(format!(
                "{} You are now level {}!",
                style("LEVEL UP!").bold().yellow(),
                self.level
            ));
        }
        lines.push(format!(
            "Level {} — {}/{} XP — {} day streak",
            self.level, self.current_xp, XP_PER_LEVEL, self.streak
        ));

        for achievement in &self.achievements {
            lines.push(format!("Achievement unlocked: {achievement}"));
        }
        for reward in &self.unlocked_rewards {
            lines.push(format!("Reward unlocked: {reward}"));
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: QuestArgs, json_mode: bool) -> Result<()> {
    let (pool, config) = open_database().await?;
    let quests = Arc::new(SqliteQuestRepository::new(pool.clone()));
    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let user_service = UserService::new(users.clone());
    let service = QuestService::new(quests, users);

    match args.command {
        QuestCommands::Add {
            user,
            title,
            category,
            description,
            xp,
            time_estimate,
        } => {
            let owner = user_service.get_by_username(&user).await?;
            let mut quest = Quest::new(owner.id, title, category);
            if let Some(description) = description {
                quest = quest.with_description(description);
            }
            if let Some(xp) = xp {
                quest = quest.with_xp(xp);
            }
            if let Some(estimate) = time_estimate {
                quest = quest.with_time_estimate(estimate);
            }
            let quest = service.create(quest).await?;
            output(&QuestOutput::from(&quest), json_mode);
        }

        QuestCommands::List {
            user,
            status,
            category,
        } => {
            let owner = user_service.get_by_username(&user).await?;
            let status = match status {
                Some(s) => Some(
                    QuestStatus::from_str(&s)
                        .ok_or_else(|| anyhow::anyhow!("Invalid status: {s}"))?,
                ),
                None => None,
            };
            let listed = service
                .list(owner.id, QuestFilter { status, category })
                .await?;
            let out = QuestListOutput {
                total: listed.len(),
                table: TableFormatter::new().format_quests(&listed),
                quests: listed.iter().map(QuestOutput::from).collect(),
            };
            output(&out, json_mode);
        }

        QuestCommands::Show { id } => {
            let uuid = resolve_quest_id(&pool, &id).await?;
            let quest = service.get(uuid).await?;
            output(&QuestOutput::from(&quest), json_mode);
        }

        QuestCommands::Complete { id } => {
            let uuid = resolve_quest_id(&pool, &id).await?;
            let policy = StreakPolicy {
                reset_on_gap: config.progression.reset_streak_on_gap,
            };
            let completion = QuestCompletionService::new(pool.clone(), policy);
            let receipt = completion.complete_quest(uuid).await?;
            output(&CompletionOutput::from(&receipt), json_mode);
        }

        QuestCommands::Archive { id } => {
            let uuid = resolve_quest_id(&pool, &id).await?;
            let quest = service.archive(uuid).await?;
            output(&QuestOutput::from(&quest), json_mode);
        }

        QuestCommands::Reactivate { id } => {
            let uuid = resolve_quest_id(&pool, &id).await?;
            let quest = service.reactivate(uuid).await?;
            output(&QuestOutput::from(&quest), json_mode);
        }

        QuestCommands::Update {
            id,
            title,
            description,
            xp,
            time_estimate,
            category,
        } => {
            let uuid = resolve_quest_id(&pool, &id).await?;
            let quest = service
                .update(
                    uuid,
                    QuestUpdate {
                        title,
                        description,
                        xp,
                        time_estimate,
                        category,
                    },
                )
                .await?;
            output(&QuestOutput::from(&quest), json_mode);
        }

        QuestCommands::Delete { id } => {
            let uuid = resolve_quest_id(&pool, &id).await?;
            service.delete(uuid).await?;
            if !json_mode {
                println!("Quest deleted: {uuid}");
            } else {
                println!(
                    "{}",
                    serde_json::json!({ "success": true, "deleted": uuid.to_string() })
                );
            }
        }
    }

    Ok(())
}

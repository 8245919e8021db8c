//! User CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::sync::Arc;

use crate::adapters::sqlite::SqliteUserRepository;
use crate::cli::open_database;
use crate::cli::output::{output, CommandOutput};
use crate::cli::table::TableFormatter;
use crate::domain::models::User;
use crate::domain::progression::XP_PER_LEVEL;
use crate::services::UserService;

#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommands,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Register a new user
    Register {
        /// Unique username
        username: String,
    },
    /// Show a user's progression
    Show {
        /// Username
        username: String,
    },
    /// List all users
    List,
}

#[derive(Debug, serde::Serialize)]
pub struct UserOutput {
    pub id: String,
    pub username: String,
    pub level: u32,
    pub current_xp: u32,
    pub xp_to_next_level: u32,
    pub total_xp: u32,
    pub streak: u32,
    pub last_active_date: Option<String>,
}

impl From<&User> for UserOutput {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            level: user.level,
            current_xp: user.current_xp,
            xp_to_next_level: XP_PER_LEVEL - user.current_xp,
            total_xp: user.total_xp,
            streak: user.streak,
            last_active_date: user.last_active_date.map(|d| d.to_string()),
        }
    }
}

impl CommandOutput for UserOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("{} (level {})", self.username, self.level),
            format!(
                "XP: {}/{} ({} to next level, {} lifetime)",
                self.current_xp, XP_PER_LEVEL, self.xp_to_next_level, self.total_xp
            ),
            format!("Streak: {} days", self.streak),
        ];
        if let Some(date) = &self.last_active_date {
            lines.push(format!("Last active: {date}"));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct UserListOutput {
    pub users: Vec<UserOutput>,
    pub total: usize,
    #[serde(skip)]
    table: String,
}

impl CommandOutput for UserListOutput {
    fn to_human(&self) -> String {
        if self.users.is_empty() {
            return "No users registered.".to_string();
        }
        self.table.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: UserArgs, json_mode: bool) -> Result<()> {
    let (pool, _config) = open_database().await?;
    let service = UserService::new(Arc::new(SqliteUserRepository::new(pool)));

    match args.command {
        UserCommands::Register { username } => {
            let user = service.register(&username).await?;
            output(&UserOutput::from(&user), json_mode);
        }
        UserCommands::Show { username } => {
            let user = service.get_by_username(&username).await?;
            output(&UserOutput::from(&user), json_mode);
        }
        UserCommands::List => {
            let users = service.list().await?;
            let out = UserListOutput {
                total: users.len(),
                table: TableFormatter::new().format_users(&users),
                users: users.iter().map(UserOutput::from).collect(),
            };
            output(&out, json_mode);
        }
    }

    Ok(())
}

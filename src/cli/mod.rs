//! Command-line interface.

use clap::{Parser, Subcommand};
use sqlx::SqlitePool;

use crate::config::ConfigLoader;
use crate::domain::models::Config;

pub mod commands;
pub mod id_resolver;
pub mod output;
pub mod table;

#[derive(Parser)]
#[command(name = "questlog")]
#[command(about = "Questlog - gamified quest tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the questlog database and configuration
    Init(commands::init::InitArgs),

    /// User management commands
    User(commands::user::UserArgs),

    /// Quest management commands
    Quest(commands::quest::QuestArgs),

    /// Reward management commands
    Reward(commands::reward::RewardArgs),

    /// Achievement listing commands
    Achievement(commands::achievement::AchievementArgs),

    /// Category management commands
    Category(commands::category::CategoryArgs),
}

/// Load config and open the configured database, running migrations.
pub async fn open_database() -> anyhow::Result<(SqlitePool, Config)> {
    use anyhow::Context;

    let config = ConfigLoader::load()?;
    let database_url = format!("sqlite:{}", config.database.path);
    let pool = crate::adapters::sqlite::initialize_database(&database_url, None)
        .await
        .context("Failed to open database. Run 'questlog init' first.")?;
    Ok((pool, config))
}

/// Print an error and exit non-zero, honoring `--json`.
pub fn handle_error(err: anyhow::Error, json_mode: bool) {
    if json_mode {
        let payload = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
        });
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_default()
        );
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}

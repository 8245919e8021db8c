//! Implementation of the `questlog init` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tokio::fs;

use crate::adapters::sqlite::initialize_database;
use crate::cli::output::{output, CommandOutput};
use crate::config::write_default_config;
use crate::services::seed_demo_data;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force reinitialization even if already initialized
    #[arg(long, short)]
    pub force: bool,

    /// Seed demo data (user, categories, starter quests, rewards)
    #[arg(long)]
    pub seed: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub initialized_path: PathBuf,
    pub database_initialized: bool,
    pub seeded: bool,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if self.database_initialized {
            lines.push("Database initialized at .questlog/questlog.db".to_string());
        }
        if self.seeded {
            lines.push("Seeded demo data (user \"Alex the Warrior\")".to_string());
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let target_path = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.path)
    };

    let questlog_dir = target_path.join(".questlog");

    if questlog_dir.exists() && !args.force {
        let output_data = InitOutput {
            success: false,
            message: "Already initialized. Use --force to reinitialize.".to_string(),
            initialized_path: target_path,
            database_initialized: false,
            seeded: false,
        };
        output(&output_data, json_mode);
        return Ok(());
    }

    if args.force && questlog_dir.exists() {
        fs::remove_dir_all(&questlog_dir)
            .await
            .context("Failed to remove existing .questlog directory")?;
    }

    fs::create_dir_all(&questlog_dir)
        .await
        .with_context(|| format!("Failed to create {questlog_dir:?}"))?;

    write_default_config(questlog_dir.join("config.yaml"))?;

    let db_path = questlog_dir.join("questlog.db");
    let db_url = format!("sqlite:{}", db_path.display());
    let pool = initialize_database(&db_url, None)
        .await
        .context("Failed to initialize database")?;

    let seeded = if args.seed {
        seed_demo_data(&pool).await?;
        true
    } else {
        false
    };

    let output_data = InitOutput {
        success: true,
        message: if args.force {
            "Reinitialized successfully.".to_string()
        } else {
            "Initialized successfully.".to_string()
        },
        initialized_path: target_path,
        database_initialized: true,
        seeded,
    };

    output(&output_data, json_mode);
    Ok(())
}

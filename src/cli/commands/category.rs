//! Category CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::sync::Arc;

use crate::adapters::sqlite::{SqliteCategoryRepository, SqliteUserRepository};
use crate::cli::open_database;
use crate::cli::output::{output, CommandOutput};
use crate::cli::table::TableFormatter;
use crate::domain::models::Category;
use crate::services::{CategoryService, UserService};

#[derive(Args, Debug)]
pub struct CategoryArgs {
    #[command(subcommand)]
    pub command: CategoryCommands,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Add a new category
    Add {
        /// Owning username
        #[arg(short, long)]
        user: String,
        /// Category name (unique per user)
        name: String,
        /// Display color token
        #[arg(short, long, default_value = "chart-1")]
        color: String,
    },
    /// List categories with completion totals
    List {
        /// Owning username
        #[arg(short, long)]
        user: String,
    },
}

#[derive(Debug, serde::Serialize)]
pub struct CategoryOutput {
    pub id: String,
    pub name: String,
    pub color: String,
    pub total_xp: u32,
    pub quest_count: u32,
}

impl From<&Category> for CategoryOutput {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            color: category.color.clone(),
            total_xp: category.total_xp,
            quest_count: category.quest_count,
        }
    }
}

impl CommandOutput for CategoryOutput {
    fn to_human(&self) -> String {
        format!(
            "Category: {} ({})\nTotal XP: {}\nCompleted quests: {}",
            self.name, self.color, self.total_xp, self.quest_count
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct CategoryListOutput {
    pub categories: Vec<CategoryOutput>,
    pub total: usize,
    #[serde(skip)]
    table: String,
}

impl CommandOutput for CategoryListOutput {
    fn to_human(&self) -> String {
        if self.categories.is_empty() {
            return "No categories found.".to_string();
        }
        self.table.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: CategoryArgs, json_mode: bool) -> Result<()> {
    let (pool, _config) = open_database().await?;
    let user_service = UserService::new(Arc::new(SqliteUserRepository::new(pool.clone())));
    let service = CategoryService::new(Arc::new(SqliteCategoryRepository::new(pool)));

    match args.command {
        CategoryCommands::Add { user, name, color } => {
            let owner = user_service.get_by_username(&user).await?;
            let category = service.create(Category::new(owner.id, name, color)).await?;
            output(&CategoryOutput::from(&category), json_mode);
        }
        CategoryCommands::List { user } => {
            let owner = user_service.get_by_username(&user).await?;
            let listed = service.list(owner.id).await?;
            let out = CategoryListOutput {
                total: listed.len(),
                table: TableFormatter::new().format_categories(&listed),
                categories: listed.iter().map(CategoryOutput::from).collect(),
            };
            output(&out, json_mode);
        }
    }

    Ok(())
}

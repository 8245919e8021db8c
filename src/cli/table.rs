//! Table output formatting for CLI listings using comfy-table.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::cli::output::truncate;
use crate::domain::models::{Achievement, Category, Quest, QuestStatus, Reward, User};

/// Table formatter for CLI output
pub struct TableFormatter {
    use_colors: bool,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
        }
    }

    pub fn format_quests(&self, quests: &[Quest]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("XP").add_attribute(Attribute::Bold),
            Cell::new("Est.").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

        for quest in quests {
            let status_cell = if self.use_colors {
                Cell::new(quest.status.as_str()).fg(status_color(quest.status))
            } else {
                Cell::new(quest.status.as_str())
            };
            table.add_row(vec![
                Cell::new(&quest.id.to_string()[..8]),
                Cell::new(truncate(&quest.title, 40)),
                Cell::new(&quest.category),
                Cell::new(quest.xp.to_string()),
                Cell::new(quest.time_estimate.as_deref().unwrap_or("-")),
                status_cell,
            ]);
        }

        table.to_string()
    }

    pub fn format_rewards(&self, rewards: &[Reward]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Reward").add_attribute(Attribute::Bold),
            Cell::new("Requires").add_attribute(Attribute::Bold),
            Cell::new("State").add_attribute(Attribute::Bold),
        ]);

        for reward in rewards {
            let mut requirements = Vec::new();
            if let Some(xp) = reward.xp_required {
                requirements.push(format!("{xp} XP"));
            }
            if let Some(streak) = reward.streak_required {
                requirements.push(format!("{streak} day streak"));
            }
            let requires = if requirements.is_empty() {
                "-".to_string()
            } else {
                requirements.join(" or ")
            };

            let state = if reward.claimed {
                "claimed"
            } else if reward.unlocked {
                "unlocked"
            } else {
                "locked"
            };
            let state_cell = if self.use_colors {
                let color = match state {
                    "claimed" => Color::DarkGrey,
                    "unlocked" => Color::Green,
                    _ => Color::Yellow,
                };
                Cell::new(state).fg(color)
            } else {
                Cell::new(state)
            };

            table.add_row(vec![
                Cell::new(&reward.id.to_string()[..8]),
                Cell::new(format!("{} {}", reward.icon, truncate(&reward.title, 30))),
                Cell::new(requires),
                state_cell,
            ]);
        }

        table.to_string()
    }

    pub fn format_achievements(&self, achievements: &[Achievement]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            Cell::new("Achievement").add_attribute(Attribute::Bold),
            Cell::new("Description").add_attribute(Attribute::Bold),
            Cell::new("XP").add_attribute(Attribute::Bold),
            Cell::new("Unlocked").add_attribute(Attribute::Bold),
        ]);

        for achievement in achievements {
            table.add_row(vec![
                Cell::new(format!("{} {}", achievement.icon, achievement.title)),
                Cell::new(achievement.description.as_deref().unwrap_or("-")),
                Cell::new(achievement.xp_reward.to_string()),
                Cell::new(achievement.unlocked_at.format("%Y-%m-%d").to_string()),
            ]);
        }

        table.to_string()
    }

    pub fn format_categories(&self, categories: &[Category]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Color").add_attribute(Attribute::Bold),
            Cell::new("Total XP").add_attribute(Attribute::Bold),
            Cell::new("Quests").add_attribute(Attribute::Bold),
        ]);

        for category in categories {
            table.add_row(vec![
                Cell::new(&category.name),
                Cell::new(&category.color),
                Cell::new(category.total_xp.to_string()),
                Cell::new(category.quest_count.to_string()),
            ]);
        }

        table.to_string()
    }

    pub fn format_users(&self, users: &[User]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            Cell::new("Username").add_attribute(Attribute::Bold),
            Cell::new("Level").add_attribute(Attribute::Bold),
            Cell::new("XP").add_attribute(Attribute::Bold),
            Cell::new("Total XP").add_attribute(Attribute::Bold),
            Cell::new("Streak").add_attribute(Attribute::Bold),
        ]);

        for user in users {
            table.add_row(vec![
                Cell::new(&user.username),
                Cell::new(user.level.to_string()),
                Cell::new(user.current_xp.to_string()),
                Cell::new(user.total_xp.to_string()),
                Cell::new(format!("{} days", user.streak)),
            ]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn status_color(status: QuestStatus) -> Color {
    match status {
        QuestStatus::Active => Color::Cyan,
        QuestStatus::Completed => Color::Green,
        QuestStatus::Archived => Color::DarkGrey,
    }
}

/// Check if color output is supported
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }
    true
}

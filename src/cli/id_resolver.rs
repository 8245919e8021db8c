//! Short ID prefix resolution for CLI commands.
//!
//! Allows users to specify any unique prefix of a UUID instead of the full
//! 36-char ID, similar to git short hashes.

use anyhow::{bail, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Resolve a quest ID prefix to a full UUID.
pub async fn resolve_quest_id(pool: &SqlitePool, prefix: &str) -> Result<Uuid> {
    resolve_prefix(pool, prefix, "quest", "SELECT id FROM quests WHERE id LIKE ?").await
}

/// Resolve a reward ID prefix to a full UUID.
pub async fn resolve_reward_id(pool: &SqlitePool, prefix: &str) -> Result<Uuid> {
    resolve_prefix(pool, prefix, "reward", "SELECT id FROM rewards WHERE id LIKE ?").await
}

fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        bail!("ID prefix must not be empty");
    }
    if !prefix.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
        bail!(
            "Invalid ID prefix '{}': must contain only hex characters and dashes",
            prefix
        );
    }
    Ok(())
}

async fn resolve_prefix(
    pool: &SqlitePool,
    prefix: &str,
    entity: &str,
    query: &str,
) -> Result<Uuid> {
    // Fast path: a full UUID resolves directly.
    if let Ok(uuid) = Uuid::parse_str(prefix) {
        return Ok(uuid);
    }

    validate_prefix(prefix)?;

    let pattern = format!("{prefix}%");
    let rows: Vec<(String,)> = sqlx::query_as(query).bind(&pattern).fetch_all(pool).await?;

    match rows.len() {
        0 => bail!("No {} found matching '{}'", entity, prefix),
        1 => Ok(Uuid::parse_str(&rows[0].0)?),
        n => bail!(
            "Ambiguous {} ID prefix '{}': {} matches. Use more characters.",
            entity,
            prefix,
            n
        ),
    }
}

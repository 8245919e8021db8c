//! Questlog - gamified quest tracker
//!
//! Users complete quests to earn XP, level up, build streaks, unlock rewards,
//! and accumulate achievements. The core is the completion transaction: one
//! event atomically advances the user's progression, rolls category
//! aggregates, appends achievement records, and unlocks rewards.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Entities, pure progression calculators,
//!   repository ports, and the error taxonomy
//! - **Adapters Layer** (`adapters`): SQLite implementations of the ports
//! - **Service Layer** (`services`): Business logic, including the atomic
//!   quest-completion transaction
//! - **CLI Layer** (`cli`): Command-line interface

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigLoader;
pub use domain::models::{Achievement, Category, Config, Quest, QuestStatus, Reward, User};
pub use domain::{DomainError, DomainResult};
pub use services::{CompletionReceipt, QuestCompletionService};

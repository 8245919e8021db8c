//! CLI command implementations.

pub mod achievement;
pub mod category;
pub mod init;
pub mod quest;
pub mod reward;
pub mod user;

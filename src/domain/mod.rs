//! Domain layer for the Questlog tracker.
//!
//! Core business logic and domain models: entities, the pure progression
//! calculators, repository ports, and the error taxonomy.

pub mod errors;
pub mod models;
pub mod ports;
pub mod progression;

pub use errors::{DomainError, DomainResult};

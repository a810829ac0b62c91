//! Subcommand implementations.

pub mod analyze;
pub mod inspect;
pub mod quote;
pub mod settings;

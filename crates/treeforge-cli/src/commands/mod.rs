//! Subcommand implementations.

pub mod build;
pub mod completion;
pub mod list;
pub mod show;

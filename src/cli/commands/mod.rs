//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a
//! group of CLI commands.

pub mod completions;
pub mod config;
pub mod document;
pub mod search;

// Re-export argument types for use in mod.rs
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use document::{AddArgs, DeleteArgs, GetArgs, SetArgs};
pub use search::{ListArgs, SearchArgs};

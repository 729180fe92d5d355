//! Core domain logic (adapter-agnostic)
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Ids, payloads, snapshot records and listings
//! - **xdg**: XDG directory handling
//! - **storage**: Document store, snapshots and checkpoints
//! - **index**: Analyzer, posting lists, projection and synchronizer
//! - **search**: Query execution and result assembly
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod index;
pub mod search;
pub mod services;
pub mod storage;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{FolkError, Result};
pub use services::Services;

//! folk - concurrent document store with a keyword index
//!
//! Keeps JSON documents in memory under integer ids, persists them as
//! whole-store snapshots, and answers boolean-AND keyword queries over
//! a text projection of each document.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - storage (document store, snapshots, checkpoints)
//!   - index (analyzer, posting lists, synchronizer)
//!   - search (query executor, result assembler)
//!   - services (unified service container)
//!
//! - **cli**: clap adapter (depends on core)
//!
//! # Consistency
//!
//! Store reads and writes are linearizable. The index is updated by a
//! background worker and may briefly trail the store; searches never
//! return documents that are no longer live.

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{FolkError, Result};
pub use core::services::Services;
pub use core::storage::DocumentStore;
pub use core::types::*;
